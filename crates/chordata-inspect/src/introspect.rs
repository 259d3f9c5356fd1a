use std::collections::HashSet;

use tracing::{debug, warn};

use chordata_store::{AttributeSchema, RelationshipSchema, StorageType, StoreError, StoreGateway, StoreResult};
use chordata_types::{AttributeDescriptor, AttributeType, EntityDescriptor, RelationshipDescriptor, UNKNOWN_ENTITY};

use crate::error::{InspectError, InspectResult};

/// Map a store's storage type onto the closed attribute tag set.
pub fn attribute_type(storage: &StorageType) -> AttributeType {
    match storage {
        StorageType::Integer16 => AttributeType::Int16,
        StorageType::Integer32 => AttributeType::Int32,
        StorageType::Integer64 => AttributeType::Int64,
        StorageType::Decimal => AttributeType::Decimal,
        StorageType::Double => AttributeType::Double,
        StorageType::Float => AttributeType::Float,
        StorageType::String => AttributeType::String,
        StorageType::Boolean => AttributeType::Boolean,
        StorageType::Date => AttributeType::Date,
        StorageType::BinaryData => AttributeType::Binary,
        StorageType::Uuid => AttributeType::Uuid,
        StorageType::Uri => AttributeType::Uri,
        StorageType::Transformable => AttributeType::Transformable,
        StorageType::ObjectId => AttributeType::ObjectReference,
        StorageType::Other(_) => AttributeType::Unknown,
    }
}

/// Describes every named entity of a store.
///
/// Descriptors come back in the store's own entity order. Anonymous entities
/// are skipped. A relationship whose destination is missing or not part of
/// the live schema reports [`UNKNOWN_ENTITY`]. A failed count query reports
/// zero for that entity alone, and a failed attribute or relationship read
/// leaves that entity's lists empty.
#[derive(Clone, Debug)]
pub struct SchemaIntrospector {
    gateway: StoreGateway,
}

impl SchemaIntrospector {
    pub fn new(gateway: StoreGateway) -> Self {
        Self { gateway }
    }

    pub async fn describe_all(&self) -> InspectResult<Vec<EntityDescriptor>> {
        let names = self
            .gateway
            .run(|store| store.list_entities())
            .await
            .and_then(|r| r)
            .map_err(InspectError::SchemaUnavailable)?;

        let known: HashSet<String> = names.iter().flatten().cloned().collect();
        let mut descriptors = Vec::with_capacity(known.len());

        for name in names {
            let Some(name) = name else {
                debug!("skipping entity without a name");
                continue;
            };
            let Some((attributes, relationships)) = self.read_schema(&name).await? else {
                continue;
            };
            let live_count = self.count(&name).await;

            descriptors.push(EntityDescriptor {
                attributes: attributes.iter().map(describe_attribute).collect(),
                relationships: relationships
                    .iter()
                    .map(|r| describe_relationship(r, &known))
                    .collect(),
                live_count,
                name,
            });
        }

        Ok(descriptors)
    }

    /// Attributes and relationships of one entity, or `None` if the entity
    /// vanished from the schema after it was listed.
    ///
    /// A failed read of one entity's schema describes it with no attributes
    /// or relationships. Only a store that is gone altogether is fatal.
    async fn read_schema(
        &self,
        entity: &str,
    ) -> InspectResult<Option<(Vec<AttributeSchema>, Vec<RelationshipSchema>)>> {
        let name = entity.to_string();
        let result = self
            .gateway
            .run(move |store| -> StoreResult<_> {
                Ok((store.list_attributes(&name)?, store.list_relationships(&name)?))
            })
            .await
            .and_then(|r| r);

        match result {
            Ok(schema) => Ok(Some(schema)),
            Err(StoreError::UnknownEntity(_)) => {
                warn!(entity, fault = "schema", "entity disappeared during introspection");
                Ok(None)
            }
            Err(StoreError::Unavailable) => {
                Err(InspectError::SchemaUnavailable(StoreError::Unavailable))
            }
            Err(e) => {
                warn!(
                    entity,
                    fault = "schema",
                    error = %e,
                    "schema read failed, describing entity as empty"
                );
                Ok(Some((Vec::new(), Vec::new())))
            }
        }
    }

    async fn count(&self, entity: &str) -> u64 {
        let name = entity.to_string();
        match self.gateway.run(move |store| store.count_records(&name)).await.and_then(|r| r) {
            Ok(n) => n,
            Err(e) => {
                warn!(entity, fault = "count", error = %e, "count query failed, reporting zero");
                0
            }
        }
    }
}

fn describe_attribute(a: &AttributeSchema) -> AttributeDescriptor {
    AttributeDescriptor::new(a.name.clone(), attribute_type(&a.storage_type), a.optional)
}

fn describe_relationship(r: &RelationshipSchema, known: &HashSet<String>) -> RelationshipDescriptor {
    let destination = r
        .destination
        .as_deref()
        .filter(|d| known.contains(*d))
        .unwrap_or(UNKNOWN_ENTITY);
    RelationshipDescriptor::new(r.name.clone(), destination, r.to_many, r.optional)
}
