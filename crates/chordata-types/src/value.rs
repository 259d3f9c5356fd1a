use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A dynamically-typed field value as held by a persistent store.
///
/// The variant set is closed so that every consumer can match exhaustively.
/// `Missing` is an explicit absent value; a store that has no entry at all
/// for an attribute is treated the same way by the formatter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DynamicValue {
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    Bytes(Vec<u8>),
    UniqueId(Uuid),
    Locator(Url),
    Missing,
}

impl DynamicValue {
    /// Returns `true` for [`DynamicValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Short lowercase name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Decimal(_) => "decimal",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Timestamp(_) => "timestamp",
            Self::Bytes(_) => "bytes",
            Self::UniqueId(_) => "unique_id",
            Self::Locator(_) => "locator",
            Self::Missing => "missing",
        }
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Decimal> for DynamicValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<DateTime<Utc>> for DynamicValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<Uuid> for DynamicValue {
    fn from(v: Uuid) -> Self {
        Self::UniqueId(v)
    }
}

impl From<Url> for DynamicValue {
    fn from(v: Url) -> Self {
        Self::Locator(v)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}
