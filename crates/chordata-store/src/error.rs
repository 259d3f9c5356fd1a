/// Errors from persistent store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named entity is not part of the store's schema.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// A value was supplied for an attribute the entity does not declare.
    #[error("entity {entity} has no attribute {attribute}")]
    UnknownAttribute { entity: String, attribute: String },

    /// A count or fetch query failed inside the store.
    #[error("query on {entity} failed: {reason}")]
    Query { entity: String, reason: String },

    /// The store's home context is gone; nothing can be queried.
    #[error("store is unavailable")]
    Unavailable,

    /// A submitted job was dropped before it produced a result.
    #[error("store job abandoned before completion")]
    Abandoned,

    /// A fixture document is structurally invalid.
    #[error("invalid fixture: {0}")]
    Fixture(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
