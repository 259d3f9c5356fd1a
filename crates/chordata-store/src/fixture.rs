use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use chordata_types::DynamicValue;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryStore;
use crate::schema::{AttributeSchema, EntityModel, RelationshipSchema};

/// JSON description of a data model and its records.
///
/// ```json
/// { "entities": [ {
///     "name": "Category",
///     "attributes": [ { "name": "categoryName", "type": "string" } ],
///     "relationships": [ { "name": "products", "destination": "Product", "toMany": true } ],
///     "records": [ { "categoryName": { "type": "text", "value": "Seafood" } } ]
/// } ] }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreFixture {
    #[serde(default)]
    pub entities: Vec<EntityFixture>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityFixture {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeSchema>,
    #[serde(default)]
    pub relationships: Vec<RelationshipSchema>,
    #[serde(default)]
    pub records: Vec<BTreeMap<String, DynamicValue>>,
}

impl StoreFixture {
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Build a fresh [`InMemoryStore`] holding every entity and record.
    ///
    /// All entities are defined before any record is inserted. Records on an
    /// anonymous entity are rejected since they could never be addressed.
    pub fn build(&self) -> StoreResult<InMemoryStore> {
        let store = InMemoryStore::new();
        for entity in &self.entities {
            store.define_entity(EntityModel {
                name: entity.name.clone(),
                attributes: entity.attributes.clone(),
                relationships: entity.relationships.clone(),
            });
        }

        for entity in &self.entities {
            let Some(name) = entity.name.as_deref() else {
                if !entity.records.is_empty() {
                    return Err(StoreError::Fixture("records on an unnamed entity".into()));
                }
                continue;
            };
            for record in &entity.records {
                store.insert(name, record.iter().map(|(k, v)| (k.as_str(), v.clone())))?;
            }
        }

        tracing::debug!(
            entities = store.entity_count(),
            records = store.total_records(),
            "fixture store built"
        );
        Ok(store)
    }
}
