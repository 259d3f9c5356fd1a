use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Destination name reported for a relationship whose target entity cannot
/// be resolved from the live schema.
pub const UNKNOWN_ENTITY: &str = "Unknown";

/// Closed set of attribute type tags.
///
/// Storage types a store reports that have no counterpart here map to
/// [`AttributeType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    Int16,
    Int32,
    Int64,
    Decimal,
    Double,
    Float,
    String,
    Boolean,
    Date,
    Binary,
    #[serde(rename = "UUID")]
    Uuid,
    #[serde(rename = "URI")]
    Uri,
    Transformable,
    ObjectReference,
    Unknown,
}

impl AttributeType {
    /// Every tag, in declaration order.
    pub const ALL: [AttributeType; 15] = [
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Decimal,
        Self::Double,
        Self::Float,
        Self::String,
        Self::Boolean,
        Self::Date,
        Self::Binary,
        Self::Uuid,
        Self::Uri,
        Self::Transformable,
        Self::ObjectReference,
        Self::Unknown,
    ];

    /// The tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Decimal => "Decimal",
            Self::Double => "Double",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::Binary => "Binary",
            Self::Uuid => "UUID",
            Self::Uri => "URI",
            Self::Transformable => "Transformable",
            Self::ObjectReference => "ObjectReference",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypeError::UnknownAttributeType(s.to_string()))
    }
}

/// One attribute of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    pub attribute_type: AttributeType,
    /// Whether the store permits a missing value.
    pub optional: bool,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType, optional: bool) -> Self {
        Self {
            name: name.into(),
            attribute_type,
            optional,
        }
    }
}

/// One relationship of an entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDescriptor {
    pub name: String,
    /// Target entity name, or [`UNKNOWN_ENTITY`] when unresolved.
    pub destination_entity: String,
    pub to_many: bool,
    pub optional: bool,
}

impl RelationshipDescriptor {
    pub fn new(
        name: impl Into<String>,
        destination_entity: impl Into<String>,
        to_many: bool,
        optional: bool,
    ) -> Self {
        Self {
            name: name.into(),
            destination_entity: destination_entity.into(),
            to_many,
            optional,
        }
    }

    /// Returns `true` if the destination could not be resolved.
    pub fn is_unresolved(&self) -> bool {
        self.destination_entity == UNKNOWN_ENTITY
    }
}

/// Schema description of a single entity, recomputed on every assembly.
///
/// `live_count` is the total number of records currently stored for the
/// entity and is independent of any sampling cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    pub live_count: u64,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
            live_count: 0,
        }
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_parse_back() {
        for tag in AttributeType::ALL {
            assert_eq!(tag.as_str().parse::<AttributeType>().unwrap(), tag);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = "Data".parse::<AttributeType>().unwrap_err();
        assert_eq!(err, TypeError::UnknownAttributeType("Data".into()));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&AttributeType::Uuid).unwrap();
        assert_eq!(json, "\"UUID\"");
        let json = serde_json::to_string(&AttributeType::ObjectReference).unwrap();
        assert_eq!(json, "\"ObjectReference\"");
    }

    #[test]
    fn counts_follow_lists() {
        let mut entity = EntityDescriptor::new("Product");
        entity.attributes.push(AttributeDescriptor::new("productName", AttributeType::String, false));
        entity.relationships.push(RelationshipDescriptor::new("category", "Category", false, true));
        entity.relationships.push(RelationshipDescriptor::new("ghost", UNKNOWN_ENTITY, true, true));
        assert_eq!(entity.attribute_count(), 1);
        assert_eq!(entity.relationship_count(), 2);
        assert!(entity.relationship("ghost").unwrap().is_unresolved());
        assert!(entity.attribute("missing").is_none());
    }
}
