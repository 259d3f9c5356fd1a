use crate::error::TypeError;
use crate::record::InstanceSample;
use crate::schema::EntityDescriptor;
use crate::wire::ModelDocument;

/// An entity descriptor paired with its bounded record sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySnapshot {
    pub descriptor: EntityDescriptor,
    pub sample: Vec<InstanceSample>,
}

impl EntitySnapshot {
    pub fn new(descriptor: EntityDescriptor, sample: Vec<InstanceSample>) -> Self {
        Self { descriptor, sample }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Immutable aggregate of every entity in a store at one point in time.
///
/// Entities are held sorted ascending by name (byte-wise, case-sensitive).
/// The sort is stable, so entities with equal names keep their input order.
/// A `Snapshot` exposes no mutating methods once constructed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    entities: Vec<EntitySnapshot>,
}

impl Snapshot {
    /// Build a snapshot, sorting `entities` by name.
    pub fn new(mut entities: Vec<EntitySnapshot>) -> Self {
        entities.sort_by(|a, b| a.name().cmp(b.name()));
        Self { entities }
    }

    pub fn entities(&self) -> &[EntitySnapshot] {
        &self.entities
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entities.iter().map(EntitySnapshot::name).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Wire documents, one per entity, in snapshot order.
    pub fn to_documents(&self) -> Vec<ModelDocument> {
        self.entities.iter().map(ModelDocument::from).collect()
    }

    /// Pretty-printed JSON array of [`ModelDocument`]s.
    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(&self.to_documents())
            .map_err(|e| TypeError::Serialization(e.to_string()))
    }
}
