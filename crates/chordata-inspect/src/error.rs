use chordata_store::StoreError;
use thiserror::Error;

/// Errors that abort a whole introspection pass.
///
/// Per-entity count and fetch faults never surface here; they are absorbed
/// where they happen.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The store's schema could not be read at all.
    #[error("schema unavailable: {0}")]
    SchemaUnavailable(#[source] StoreError),
}

pub type InspectResult<T> = Result<T, InspectError>;
