use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use chordata_types::{DynamicValue, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::schema::{AttributeSchema, EntityModel, Record, RelationshipSchema};
use crate::traits::PersistentStore;

/// In-memory object store.
///
/// Intended for tests, demos and embedding. Entities keep their definition
/// order and records keep insertion order, which is the store's natural
/// fetch order. Clones share the same underlying data, so a host can keep a
/// handle for writes while a [`StoreGateway`](crate::StoreGateway) owns
/// another for reads.
///
/// Record identities have the form `chordata://<store>/<Entity>/p<N>` where
/// `N` is drawn from a store-wide counter and is never reused.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    store_id: Uuid,
    entities: Vec<EntityModel>,
    records: HashMap<String, Vec<StoredRecord>>,
    next_pk: u64,
}

struct StoredRecord {
    id: RecordId,
    values: HashMap<String, DynamicValue>,
}

impl Inner {
    fn model(&self, entity: &str) -> StoreResult<&EntityModel> {
        self.entities
            .iter()
            .find(|m| m.name.as_deref() == Some(entity))
            .ok_or_else(|| StoreError::UnknownEntity(entity.to_string()))
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                store_id: Uuid::now_v7(),
                entities: Vec::new(),
                records: HashMap::new(),
                next_pk: 1,
            })),
        }
    }

    /// Add an entity to the data model, replacing any existing definition
    /// with the same name. Existing records of a replaced entity are kept.
    pub fn define_entity(&self, model: EntityModel) {
        let mut inner = self.inner.write().expect("lock poisoned");
        let existing = model
            .name
            .as_deref()
            .and_then(|name| inner.entities.iter().position(|m| m.name.as_deref() == Some(name)));
        match existing {
            Some(idx) => inner.entities[idx] = model,
            None => inner.entities.push(model),
        }
    }

    /// Insert a record and return its new identity.
    ///
    /// Every key must be an attribute declared on `entity`. Declared
    /// attributes without a value are simply absent from the record.
    pub fn insert<K, V, I>(&self, entity: &str, values: I) -> StoreResult<RecordId>
    where
        K: Into<String>,
        V: Into<DynamicValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut inner = self.inner.write().expect("lock poisoned");
        let model = inner.model(entity)?;

        let mut map = HashMap::new();
        for (k, v) in values {
            let key = k.into();
            if !model.declares(&key) {
                return Err(StoreError::UnknownAttribute {
                    entity: entity.to_string(),
                    attribute: key,
                });
            }
            map.insert(key, v.into());
        }

        let pk = inner.next_pk;
        inner.next_pk += 1;
        let id = RecordId::new(format!("chordata://{}/{}/p{}", inner.store_id, entity, pk));
        inner
            .records
            .entry(entity.to_string())
            .or_default()
            .push(StoredRecord { id: id.clone(), values: map });
        Ok(id)
    }

    /// Delete a record. Returns `true` if it existed.
    pub fn delete(&self, id: &RecordId) -> bool {
        let mut inner = self.inner.write().expect("lock poisoned");
        for records in inner.records.values_mut() {
            if let Some(idx) = records.iter().position(|r| &r.id == id) {
                records.remove(idx);
                return true;
            }
        }
        false
    }

    /// Number of entity definitions, anonymous ones included.
    pub fn entity_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").entities.len()
    }

    /// Number of records across all entities.
    pub fn total_records(&self) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .records
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistentStore for InMemoryStore {
    fn list_entities(&self) -> StoreResult<Vec<Option<String>>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.entities.iter().map(|m| m.name.clone()).collect())
    }

    fn list_attributes(&self, entity: &str) -> StoreResult<Vec<AttributeSchema>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.model(entity)?.attributes.clone())
    }

    fn list_relationships(&self, entity: &str) -> StoreResult<Vec<RelationshipSchema>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner.model(entity)?.relationships.clone())
    }

    fn count_records(&self, entity: &str) -> StoreResult<u64> {
        let inner = self.inner.read().expect("lock poisoned");
        inner.model(entity)?;
        Ok(inner.records.get(entity).map_or(0, |r| r.len() as u64))
    }

    fn fetch_records(&self, entity: &str, limit: usize) -> StoreResult<Vec<Record>> {
        let inner = self.inner.read().expect("lock poisoned");
        let model = inner.model(entity)?;
        let attributes: Vec<String> = model.attributes.iter().map(|a| a.name.clone()).collect();

        let records = inner.records.get(entity).map(Vec::as_slice).unwrap_or_default();
        Ok(records
            .iter()
            .take(limit)
            .map(|r| Record {
                id: r.id.clone(),
                entity: entity.to_string(),
                attributes: attributes.clone(),
                values: r.values.clone(),
            })
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entity_count", &self.entity_count())
            .field("record_count", &self.total_records())
            .finish()
    }
}
