use tracing::warn;

use chordata_store::{Record, StoreGateway};
use chordata_types::InstanceSample;

use crate::format::ValueFormatter;

/// Records sampled per entity unless configured otherwise.
pub const DEFAULT_SAMPLE_CAP: usize = 100;

/// Fetches a bounded sample of records and renders each as strings.
///
/// The fetch runs on the store's home thread; rendering happens afterwards
/// on the caller's task, against owned copies of the records.
#[derive(Clone, Debug)]
pub struct InstanceSampler {
    gateway: StoreGateway,
    formatter: ValueFormatter,
}

impl InstanceSampler {
    pub fn new(gateway: StoreGateway) -> Self {
        Self::with_formatter(gateway, ValueFormatter::new())
    }

    pub fn with_formatter(gateway: StoreGateway, formatter: ValueFormatter) -> Self {
        Self { gateway, formatter }
    }

    /// At most `cap` samples of `entity`, in the store's natural order.
    ///
    /// Any query failure yields an empty sample.
    pub async fn sample(&self, entity: &str, cap: usize) -> Vec<InstanceSample> {
        if cap == 0 {
            return Vec::new();
        }

        let name = entity.to_string();
        let fetched = self
            .gateway
            .run(move |store| store.fetch_records(&name, cap))
            .await
            .and_then(|r| r);

        match fetched {
            Ok(records) => records.iter().take(cap).map(|r| self.render(r)).collect(),
            Err(e) => {
                warn!(entity, fault = "fetch", error = %e, "fetch query failed, sampling nothing");
                Vec::new()
            }
        }
    }

    /// Render one record, one field per attribute declared on its entity.
    pub fn render(&self, record: &Record) -> InstanceSample {
        let mut sample = InstanceSample::new(record.id.clone());
        for attribute in &record.attributes {
            let text = self.formatter.format(record.value(attribute));
            sample.fields.insert(attribute.clone(), text);
        }
        sample
    }
}
