use std::collections::HashSet;

use chordata_store::{
    AttributeSchema, EntityModel, InMemoryStore, PersistentStore, Record, RelationshipSchema,
    StorageType, StoreError, StoreGateway, StoreResult,
};

/// Wraps an [`InMemoryStore`] and fails selected queries on demand.
pub struct FlakyStore {
    pub inner: InMemoryStore,
    pub failing_counts: HashSet<String>,
    pub failing_fetches: HashSet<String>,
    pub failing_schemas: HashSet<String>,
    pub panicking_schemas: HashSet<String>,
    pub schema_down: bool,
}

impl FlakyStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            failing_counts: HashSet::new(),
            failing_fetches: HashSet::new(),
            failing_schemas: HashSet::new(),
            panicking_schemas: HashSet::new(),
            schema_down: false,
        }
    }

    pub fn fail_entity(mut self, entity: &str) -> Self {
        self.failing_counts.insert(entity.to_string());
        self.failing_fetches.insert(entity.to_string());
        self
    }

    pub fn fail_fetch(mut self, entity: &str) -> Self {
        self.failing_fetches.insert(entity.to_string());
        self
    }

    /// Fail attribute reads for `entity`.
    pub fn fail_schema(mut self, entity: &str) -> Self {
        self.failing_schemas.insert(entity.to_string());
        self
    }

    /// Panic inside attribute reads for `entity`.
    pub fn panic_schema(mut self, entity: &str) -> Self {
        self.panicking_schemas.insert(entity.to_string());
        self
    }

    pub fn schema_down(mut self) -> Self {
        self.schema_down = true;
        self
    }
}

fn query_fault(entity: &str) -> StoreError {
    StoreError::Query {
        entity: entity.to_string(),
        reason: "injected fault".into(),
    }
}

impl PersistentStore for FlakyStore {
    fn list_entities(&self) -> StoreResult<Vec<Option<String>>> {
        if self.schema_down {
            return Err(StoreError::Unavailable);
        }
        self.inner.list_entities()
    }

    fn list_attributes(&self, entity: &str) -> StoreResult<Vec<AttributeSchema>> {
        if self.panicking_schemas.contains(entity) {
            panic!("attribute read for {entity} blew up");
        }
        if self.failing_schemas.contains(entity) {
            return Err(query_fault(entity));
        }
        self.inner.list_attributes(entity)
    }

    fn list_relationships(&self, entity: &str) -> StoreResult<Vec<RelationshipSchema>> {
        self.inner.list_relationships(entity)
    }

    fn count_records(&self, entity: &str) -> StoreResult<u64> {
        if self.failing_counts.contains(entity) {
            return Err(query_fault(entity));
        }
        self.inner.count_records(entity)
    }

    fn fetch_records(&self, entity: &str, limit: usize) -> StoreResult<Vec<Record>> {
        if self.failing_fetches.contains(entity) {
            return Err(query_fault(entity));
        }
        self.inner.fetch_records(entity, limit)
    }
}

/// Catalogue model: `Category`, `Product` (3 attributes, 2 relationships)
/// and `Supplier`, with no records.
pub fn catalogue() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.define_entity(
        EntityModel::new("Product")
            .attribute("productName", StorageType::String, false)
            .attribute("unitPrice", StorageType::Decimal, true)
            .attribute("discontinued", StorageType::Boolean, true)
            .relationship("category", Some("Category"), false, true)
            .relationship("supplier", Some("Supplier"), false, true),
    );
    store.define_entity(
        EntityModel::new("Category")
            .attribute("categoryName", StorageType::String, false)
            .relationship("products", Some("Product"), true, true),
    );
    store.define_entity(
        EntityModel::new("Supplier")
            .attribute("companyName", StorageType::String, false)
            .attribute("fax", StorageType::String, true),
    );
    store
}

pub fn spawn(store: impl PersistentStore) -> StoreGateway {
    StoreGateway::spawn(store).unwrap()
}
