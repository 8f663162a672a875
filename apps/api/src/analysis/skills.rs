use std::collections::BTreeSet;

use crate::analysis::normalize::normalize;
use crate::analysis::vocabulary::SkillVocabulary;
use crate::nlp::LanguageModel;

/// Finds vocabulary skills in `text`.
///
/// Single-token skills match exact token surfaces of the normalized text.
/// Multi-word skills match as raw substrings, so a phrase can also hit across
/// unrelated word boundaries (e.g. "data analysis" inside "big data analysis").
/// The result is always a subset of `vocabulary`.
pub fn detect_skills(
    text: &str,
    vocabulary: &SkillVocabulary,
    model: &dyn LanguageModel,
) -> BTreeSet<String> {
    let lowered = normalize(text);
    if lowered.is_empty() {
        return BTreeSet::new();
    }

    let mut found: BTreeSet<String> = model
        .tokenize(&lowered)
        .into_iter()
        .filter(|t| vocabulary.contains(&t.text))
        .map(|t| t.text)
        .collect();

    for phrase in vocabulary.phrases() {
        if lowered.contains(phrase) {
            found.insert(phrase.to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleBasedModel;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_text_detects_nothing() {
        let model = RuleBasedModel::load(None).unwrap();
        assert!(detect_skills("", &SkillVocabulary::default(), &model).is_empty());
        assert!(detect_skills("   \n", &SkillVocabulary::default(), &model).is_empty());
    }

    #[test]
    fn test_single_and_multi_word_skills() {
        let model = RuleBasedModel::load(None).unwrap();
        let vocabulary = SkillVocabulary::new(["python", "data analysis"]);
        let found = detect_skills("I know Python and do data analysis daily", &vocabulary, &model);
        assert_eq!(found, set(&["python", "data analysis"]));
    }

    #[test]
    fn test_symbols_in_skill_names() {
        let model = RuleBasedModel::load(None).unwrap();
        let found = detect_skills(
            "Built services in C++ and JavaScript, deployed with Docker.",
            &SkillVocabulary::default(),
            &model,
        );
        assert_eq!(found, set(&["c++", "docker", "javascript"]));
    }

    #[test]
    fn test_no_partial_word_matches_for_single_tokens() {
        let model = RuleBasedModel::load(None).unwrap();
        let found = detect_skills(
            "Javanese cuisine and reactive cooking",
            &SkillVocabulary::new(["java", "react"]),
            &model,
        );
        assert!(found.is_empty(), "got {found:?}");
    }

    #[test]
    fn test_phrase_matches_inside_longer_text() {
        let model = RuleBasedModel::load(None).unwrap();
        let found = detect_skills(
            "Led big data analysis efforts",
            &SkillVocabulary::new(["data analysis"]),
            &model,
        );
        assert_eq!(found, set(&["data analysis"]));
    }

    #[test]
    fn test_result_is_subset_of_vocabulary() {
        let model = RuleBasedModel::load(None).unwrap();
        let vocabulary = SkillVocabulary::default();
        let text = "Python, SQL, AWS, Kubernetes, machine learning, leadership, Rust, Go, Excel";
        let found = detect_skills(text, &vocabulary, &model);
        assert!(!found.is_empty());
        assert!(found.iter().all(|s| vocabulary.contains(s)));
    }

    #[test]
    fn test_detection_is_repeatable() {
        let model = RuleBasedModel::load(None).unwrap();
        let vocabulary = SkillVocabulary::default();
        let text = "React and Angular developer with strong communication";
        assert_eq!(
            detect_skills(text, &vocabulary, &model),
            detect_skills(text, &vocabulary, &model)
        );
    }
}
