//! Introspection and snapshot engine for Chordata.
//!
//! Reads a live store through a [`StoreGateway`](chordata_store::StoreGateway)
//! and produces immutable [`Snapshot`](chordata_types::Snapshot)s:
//!
//! - [`ValueFormatter`] renders any [`DynamicValue`](chordata_types::DynamicValue) as a display string
//! - [`SchemaIntrospector`] describes every named entity
//! - [`InstanceSampler`] fetches and renders a bounded sample of records
//! - [`SnapshotAssembler`] combines both into a sorted snapshot
//!
//! Store work always runs on the gateway's worker. Formatting, sorting and
//! serialization run on the caller's task.

pub mod assemble;
pub mod error;
pub mod format;
pub mod introspect;
pub mod sample;

#[cfg(test)]
mod test_support;

pub use assemble::{SnapshotAssembler, SnapshotProvider};
pub use error::{InspectError, InspectResult};
pub use format::{format_value, ValueFormatter, DATE_FORMAT};
pub use introspect::{attribute_type, SchemaIntrospector};
pub use sample::{InstanceSampler, DEFAULT_SAMPLE_CAP};
