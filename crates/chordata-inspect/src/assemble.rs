use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use chordata_store::StoreGateway;
use chordata_types::{EntityDescriptor, EntitySnapshot, Snapshot};

use crate::error::InspectResult;
use crate::format::ValueFormatter;
use crate::introspect::SchemaIntrospector;
use crate::sample::{InstanceSampler, DEFAULT_SAMPLE_CAP};

/// Anything that can produce a fresh [`Snapshot`] on demand.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    async fn snapshot(&self) -> InspectResult<Snapshot>;
}

/// Builds snapshots by describing every entity and sampling each one.
///
/// Each call starts from scratch: there is no cache, and the schema is
/// re-read every time. Snapshots are not transactionally consistent across
/// entities since each entity is read by its own store job.
#[derive(Clone, Debug)]
pub struct SnapshotAssembler {
    introspector: SchemaIntrospector,
    sampler: InstanceSampler,
    cap: usize,
}

impl SnapshotAssembler {
    pub fn new(gateway: StoreGateway) -> Self {
        Self::with_formatter(gateway, ValueFormatter::new())
    }

    pub fn with_formatter(gateway: StoreGateway, formatter: ValueFormatter) -> Self {
        Self {
            introspector: SchemaIntrospector::new(gateway.clone()),
            sampler: InstanceSampler::with_formatter(gateway, formatter),
            cap: DEFAULT_SAMPLE_CAP,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Entity descriptors only, sorted by name. No records are fetched.
    pub async fn describe(&self) -> InspectResult<Vec<EntityDescriptor>> {
        let mut descriptors = self.introspector.describe_all().await?;
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(descriptors)
    }

    pub async fn assemble(&self) -> InspectResult<Snapshot> {
        let started = Instant::now();
        let descriptors = self.introspector.describe_all().await?;

        let mut entities = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let sample = self.sampler.sample(&descriptor.name, self.cap).await;
            entities.push(EntitySnapshot::new(descriptor, sample));
        }

        let snapshot = Snapshot::new(entities);
        debug!(
            entities = snapshot.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot assembled"
        );
        Ok(snapshot)
    }
}

#[async_trait]
impl SnapshotProvider for SnapshotAssembler {
    async fn snapshot(&self) -> InspectResult<Snapshot> {
        self.assemble().await
    }
}
