use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Display string for an absent field value.
pub const NIL: &str = "nil";

/// Opaque, store-assigned record identity.
///
/// A store never reuses an identity for a different record while it is
/// alive, but it may recycle identities after deletion, so a `RecordId` is
/// not a stable key across snapshots.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment of the identity, handy for compact display.
    pub fn short(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One sampled record rendered into a flat map of display strings.
///
/// `fields` holds exactly one key per attribute declared on the record's
/// entity at sample time. Absent values appear as [`NIL`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSample {
    pub identity: RecordId,
    pub fields: BTreeMap<String, String>,
}

impl InstanceSample {
    pub fn new(identity: RecordId) -> Self {
        Self {
            identity,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
