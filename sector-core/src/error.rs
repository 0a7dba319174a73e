//! Error types for catalog loading and board generation

/// Board generation failures. No partial board is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Required {role} archetype '{id}' is missing from the catalog")]
    MissingArchetype { role: &'static str, id: String },

    #[error("No unoccupied cell available for the player spawn")]
    NoSpawnCell,

    #[error("Board layout has no cells")]
    EmptyBoard,
}

/// Catalog validation failures
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog record {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Duplicate archetype id: {0}")]
    DuplicateId(String),

    #[error("Trigger references unknown archetype id: {0}")]
    UnknownTriggerTarget(String),
}
