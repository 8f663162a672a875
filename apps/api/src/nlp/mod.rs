//! Tokenizer / entity extractor collaborator.
//!
//! Everything downstream talks to `LanguageModel`; the model is loaded once at
//! startup and shared read-only across requests through `AppState`.

pub mod rule_based;

use serde::{Deserialize, Serialize};

pub use rule_based::RuleBasedModel;

/// A unit produced by tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_alpha: bool,
}

/// Semantic category attached to an entity span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Organization,
    Person,
    Location,
    Date,
    Email,
    Url,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

pub trait LanguageModel: Send + Sync {
    /// Tokens in document order. Surface text is preserved as written.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Non-overlapping entity mentions in document order; repeats are kept.
    fn entities(&self, text: &str) -> Vec<Entity>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_label_serializes_uppercase() {
        let json = serde_json::to_string(&EntityLabel::Organization).unwrap();
        assert_eq!(json, r#""ORGANIZATION""#);
    }

    #[test]
    fn test_entity_round_trips_through_json() {
        let entity = Entity::new("Acme Corp", EntityLabel::Organization);
        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"text":"Acme Corp","label":"ORGANIZATION"}"#);
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
    }
}
