//! JSON wire documents served by the models API.
//!
//! Field names are camelCase to match the dashboard client. Counts are
//! derived from the lists at conversion time so they can never disagree with
//! what is serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::InstanceSample;
use crate::schema::{AttributeDescriptor, AttributeType, EntityDescriptor, RelationshipDescriptor};
use crate::snapshot::EntitySnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument {
    pub name: String,
    pub attribute_count: usize,
    pub relationship_count: usize,
    pub entity_count: u64,
    pub attributes: Vec<AttributeDocument>,
    pub relationships: Vec<RelationshipDocument>,
    pub instances: Vec<InstanceDocument>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDocument {
    pub name: String,
    pub destination_entity: String,
    pub to_many: bool,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDocument {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(rename = "attributeValues")]
    pub attribute_values: BTreeMap<String, String>,
}

impl From<&AttributeDescriptor> for AttributeDocument {
    fn from(a: &AttributeDescriptor) -> Self {
        Self {
            name: a.name.clone(),
            attribute_type: a.attribute_type,
            optional: a.optional,
        }
    }
}

impl From<&RelationshipDescriptor> for RelationshipDocument {
    fn from(r: &RelationshipDescriptor) -> Self {
        Self {
            name: r.name.clone(),
            destination_entity: r.destination_entity.clone(),
            to_many: r.to_many,
            optional: r.optional,
        }
    }
}

impl From<&InstanceSample> for InstanceDocument {
    fn from(s: &InstanceSample) -> Self {
        Self {
            object_id: s.identity.to_string(),
            attribute_values: s.fields.clone(),
        }
    }
}

/// Schema-only document: counts and lists, no instances.
impl From<&EntityDescriptor> for ModelDocument {
    fn from(d: &EntityDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            attribute_count: d.attribute_count(),
            relationship_count: d.relationship_count(),
            entity_count: d.live_count,
            attributes: d.attributes.iter().map(AttributeDocument::from).collect(),
            relationships: d.relationships.iter().map(RelationshipDocument::from).collect(),
            instances: Vec::new(),
        }
    }
}

impl From<&EntitySnapshot> for ModelDocument {
    fn from(e: &EntitySnapshot) -> Self {
        Self {
            instances: e.sample.iter().map(InstanceDocument::from).collect(),
            ..Self::from(&e.descriptor)
        }
    }
}
