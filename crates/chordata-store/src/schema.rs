use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use chordata_types::{DynamicValue, RecordId};

/// Storage type of an attribute as the store itself reports it.
///
/// Stores may grow types the inspector has never heard of; those arrive as
/// [`StorageType::Other`] carrying the store's own name for the type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageType {
    Integer16,
    Integer32,
    Integer64,
    Decimal,
    Double,
    Float,
    String,
    Boolean,
    Date,
    BinaryData,
    Uuid,
    Uri,
    Transformable,
    ObjectId,
    Other(String),
}

impl StorageType {
    pub fn name(&self) -> &str {
        match self {
            Self::Integer16 => "integer16",
            Self::Integer32 => "integer32",
            Self::Integer64 => "integer64",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Float => "float",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::BinaryData => "binaryData",
            Self::Uuid => "uuid",
            Self::Uri => "uri",
            Self::Transformable => "transformable",
            Self::ObjectId => "objectID",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for StorageType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "integer16" => Self::Integer16,
            "integer32" => Self::Integer32,
            "integer64" => Self::Integer64,
            "decimal" => Self::Decimal,
            "double" => Self::Double,
            "float" => Self::Float,
            "string" => Self::String,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "binaryData" => Self::BinaryData,
            "uuid" => Self::Uuid,
            "uri" => Self::Uri,
            "transformable" => Self::Transformable,
            "objectID" => Self::ObjectId,
            _ => Self::Other(s),
        }
    }
}

impl From<StorageType> for String {
    fn from(t: StorageType) -> Self {
        t.name().to_string()
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute metadata as reported by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    #[serde(default)]
    pub optional: bool,
}

/// Relationship metadata as reported by the store.
///
/// `destination` is `None` when the store itself could not resolve the
/// target entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSchema {
    pub name: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub to_many: bool,
    #[serde(default)]
    pub optional: bool,
}

/// Definition of one entity in a store's data model.
///
/// An entity without a name is legal in partially-built models; inspectors
/// skip it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityModel {
    pub name: Option<String>,
    pub attributes: Vec<AttributeSchema>,
    pub relationships: Vec<RelationshipSchema>,
}

impl EntityModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// An entity whose name cannot be resolved.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: impl Into<String>, storage_type: StorageType, optional: bool) -> Self {
        self.attributes.push(AttributeSchema {
            name: name.into(),
            storage_type,
            optional,
        });
        self
    }

    pub fn relationship(
        mut self,
        name: impl Into<String>,
        destination: Option<&str>,
        to_many: bool,
        optional: bool,
    ) -> Self {
        self.relationships.push(RelationshipSchema {
            name: name.into(),
            destination: destination.map(str::to_string),
            to_many,
            optional,
        });
        self
    }

    pub fn declares(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a.name == attribute)
    }
}

/// A fetched record: an owned copy detached from the store.
///
/// `attributes` lists the attributes declared on the record's own entity at
/// fetch time, in declaration order. `values` may lack entries for some of
/// them.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: RecordId,
    pub entity: String,
    pub attributes: Vec<String>,
    pub values: HashMap<String, DynamicValue>,
}

impl Record {
    pub fn value(&self, attribute: &str) -> Option<&DynamicValue> {
        self.values.get(attribute)
    }
}
