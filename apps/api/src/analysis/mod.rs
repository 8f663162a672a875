// Resume analysis: skill detection, entity filtering, keyword-overlap scoring.
// Every function here is pure over its inputs; the model and vocabulary are
// borrowed from AppState.

pub mod entities;
pub mod handlers;
pub mod match_score;
pub mod normalize;
pub mod skills;
pub mod vocabulary;

use serde::Serialize;

use crate::nlp::{Entity, LanguageModel};
use entities::{filter_entities, DISPLAY_LABELS};
use skills::detect_skills;
use vocabulary::SkillVocabulary;

/// The analysis panel for one document.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysis {
    /// Detected skills, lowercase, sorted.
    pub skills: Vec<String>,
    /// Same skills uppercased for display.
    pub skills_display: Vec<String>,
    /// Entities with display labels only, in document order.
    pub entities: Vec<Entity>,
}

pub fn analyze_resume(
    text: &str,
    vocabulary: &SkillVocabulary,
    model: &dyn LanguageModel,
) -> ResumeAnalysis {
    let skills: Vec<String> = detect_skills(text, vocabulary, model).into_iter().collect();
    let skills_display = skills.iter().map(|s| s.to_uppercase()).collect();
    let entities = filter_entities(model.entities(text), DISPLAY_LABELS);

    ResumeAnalysis {
        skills,
        skills_display,
        entities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{EntityLabel, RuleBasedModel};

    const RESUME: &str = "Jane Doe\n\
                          Data Engineer at Acme Corp, London\n\
                          Mar 2019 - 2024\n\
                          jane@example.com\n\
                          Python, SQL and machine learning pipelines on AWS.\n";

    #[test]
    fn test_analyze_resume_panel() {
        let model = RuleBasedModel::load(None).unwrap();
        let analysis = analyze_resume(RESUME, &SkillVocabulary::default(), &model);

        assert_eq!(analysis.skills, vec!["aws", "machine learning", "python", "sql"]);
        assert_eq!(
            analysis.skills_display,
            vec!["AWS", "MACHINE LEARNING", "PYTHON", "SQL"]
        );
        assert!(analysis
            .entities
            .iter()
            .all(|e| DISPLAY_LABELS.contains(&e.label)));
        assert!(analysis
            .entities
            .contains(&Entity::new("Acme Corp", EntityLabel::Organization)));
        assert!(!analysis
            .entities
            .iter()
            .any(|e| e.text == "jane@example.com"));
    }

    #[test]
    fn test_analyze_resume_without_skills() {
        let model = RuleBasedModel::load(None).unwrap();
        let analysis = analyze_resume("Pastry chef", &SkillVocabulary::default(), &model);
        assert!(analysis.skills.is_empty());
        assert!(analysis.skills_display.is_empty());
    }
}
