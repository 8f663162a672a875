use crate::nlp::{Entity, EntityLabel};

/// Labels shown in the entities table.
pub const DISPLAY_LABELS: &[EntityLabel] = &[
    EntityLabel::Organization,
    EntityLabel::Person,
    EntityLabel::Location,
    EntityLabel::Date,
];

/// Keeps entities whose label is in `allowed`. Order and repeats are preserved.
pub fn filter_entities(entities: Vec<Entity>, allowed: &[EntityLabel]) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|e| allowed.contains(&e.label))
        .collect()
}
