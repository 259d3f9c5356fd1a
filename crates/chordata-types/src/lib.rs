//! Foundation types for Chordata.
//!
//! Every other Chordata crate depends on `chordata-types`. The types here
//! describe what an inspector sees of a persistent object store: the schema
//! of each entity, a bounded sample of its records rendered as strings, and
//! the immutable [`Snapshot`] that aggregates both.
//!
//! # Key Types
//!
//! - [`DynamicValue`] -- closed tagged union of the field values a store can hold
//! - [`AttributeType`] -- closed set of attribute type tags, `Unknown` included
//! - [`EntityDescriptor`] -- one entity's attributes, relationships and live count
//! - [`InstanceSample`] -- one record rendered into a flat string map
//! - [`Snapshot`] -- every entity paired with its sample, sorted by name
//! - [`ModelDocument`] -- the JSON wire shape served by `/api/models`

pub mod error;
pub mod record;
pub mod schema;
pub mod snapshot;
pub mod value;
pub mod wire;

pub use error::TypeError;
pub use record::{InstanceSample, RecordId, NIL};
pub use schema::{AttributeDescriptor, AttributeType, EntityDescriptor, RelationshipDescriptor, UNKNOWN_ENTITY};
pub use snapshot::{EntitySnapshot, Snapshot};
pub use value::DynamicValue;
pub use wire::{AttributeDocument, InstanceDocument, ModelDocument, RelationshipDocument};
