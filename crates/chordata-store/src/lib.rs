//! Store access for Chordata.
//!
//! The inspector never talks to a concrete database. It talks to the
//! [`PersistentStore`] capability trait, always through a [`StoreGateway`]
//! that confines every call to a single worker thread.
//!
//! # Backends
//!
//! - [`InMemoryStore`] -- ordered, lock-guarded store for tests, demos and embedding
//! - [`StoreFixture`] -- JSON description that builds an [`InMemoryStore`]
//!
//! # Design Rules
//!
//! 1. The gateway's worker is the store's only home: schema reads, counts
//!    and fetches all run there, one at a time.
//! 2. Callers await results; a caller that goes away abandons its queued
//!    work without disturbing anyone else's.
//! 3. Fetched records are owned copies. Nothing downstream can mutate the store.

pub mod error;
pub mod fixture;
pub mod gateway;
pub mod memory;
pub mod schema;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fixture::{EntityFixture, StoreFixture};
pub use gateway::{StoreGateway, DEFAULT_QUEUE_DEPTH};
pub use memory::InMemoryStore;
pub use schema::{AttributeSchema, EntityModel, Record, RelationshipSchema, StorageType};
pub use traits::PersistentStore;
