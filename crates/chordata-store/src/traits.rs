use crate::error::StoreResult;
use crate::schema::{AttributeSchema, Record, RelationshipSchema};

/// Read-only capability interface a persistent store offers the inspector.
///
/// Implementations need not be `Sync`: a [`StoreGateway`](crate::StoreGateway)
/// owns the store and calls it from a single thread.
///
/// - `list_entities` reports every entity in the data model, `None` for
///   entities whose name cannot be resolved.
/// - `count_records` and `fetch_records` are the only data queries. Fetches
///   return at most `limit` records in the store's natural order.
/// - No method may write to the store.
pub trait PersistentStore: Send + 'static {
    /// Names of all entities in the data model.
    fn list_entities(&self) -> StoreResult<Vec<Option<String>>>;

    /// Attributes declared on `entity`, in declaration order.
    fn list_attributes(&self, entity: &str) -> StoreResult<Vec<AttributeSchema>>;

    /// Relationships declared on `entity`, in declaration order.
    fn list_relationships(&self, entity: &str) -> StoreResult<Vec<RelationshipSchema>>;

    /// Total number of records currently stored for `entity`.
    fn count_records(&self, entity: &str) -> StoreResult<u64>;

    /// Up to `limit` records of `entity`.
    fn fetch_records(&self, entity: &str, limit: usize) -> StoreResult<Vec<Record>>;
}
