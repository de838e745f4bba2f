//! Module for the types describing the entities handed to the import service.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

mod record;
mod report;


pub use record::{EntityBatch, EntityRecord, FieldValue};
pub use report::{ErrorReport, FailureReport, IdentityIndex};

/// The kinds of business objects the import service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Product,
    AttributeSets,
    Attributes,
    AttributeAssociations,
    Customer,
    Category,
}

impl EntityKind {
    /// All kinds in the order a default run imports them.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Product,
        EntityKind::AttributeSets,
        EntityKind::Attributes,
        EntityKind::AttributeAssociations,
        EntityKind::Customer,
        EntityKind::Category,
    ];

    /// Human facing name, used in console output and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::AttributeSets => "attributeSets",
            EntityKind::Attributes => "attributes",
            EntityKind::AttributeAssociations => "attributeAssociations",
            EntityKind::Customer => "customer",
            EntityKind::Category => "category",
        }
    }

    /// Entity type code understood by the import service.
    pub fn code(self) -> &'static str {
        match self {
            EntityKind::Product => "catalog_product",
            EntityKind::AttributeSets => "attributeSets",
            EntityKind::Attributes => "attributes",
            EntityKind::AttributeAssociations => "attributeAssociations",
            EntityKind::Customer => "customer",
            EntityKind::Category => "catalog_category",
        }
    }

    /// The field labelling a record for humans when failures are reported.
    /// `None` means failures of this kind cannot be attributed to records.
    pub fn identity_field(self) -> Option<&'static str> {
        match self {
            EntityKind::Product => Some("sku"),
            EntityKind::Attributes => Some("attribute_id"),
            EntityKind::Category => Some("name"),
            EntityKind::AttributeSets
            | EntityKind::AttributeAssociations
            | EntityKind::Customer => None,
        }
    }

    /// The sub-types generated for this kind in a default run.
    pub fn sub_types(self) -> &'static [SubType] {
        match self {
            EntityKind::Product => &[
                SubType::Simple,
                SubType::SimpleFail,
                SubType::Configurable,
                SubType::Bundle,
                SubType::Grouped,
                SubType::Image,
                SubType::Localizable,
            ],
            _ => &[SubType::Standard],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts both the label and the service code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s || kind.code() == s)
            .ok_or_else(|| format!("unknown entity kind: {s}"))
    }
}

/// Shape of the generated data within one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubType {
    Simple,
    SimpleFail,
    Configurable,
    Bundle,
    Grouped,
    Image,
    Localizable,
    Standard,
}

impl SubType {
    pub const ALL: [SubType; 8] = [
        SubType::Simple,
        SubType::SimpleFail,
        SubType::Configurable,
        SubType::Bundle,
        SubType::Grouped,
        SubType::Image,
        SubType::Localizable,
        SubType::Standard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubType::Simple => "simple",
            SubType::SimpleFail => "simpleFail",
            SubType::Configurable => "configurable",
            SubType::Bundle => "bundle",
            SubType::Grouped => "grouped",
            SubType::Image => "image",
            SubType::Localizable => "localizable",
            SubType::Standard => "standard",
        }
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubType::ALL
            .into_iter()
            .find(|sub_type| sub_type.as_str() == s)
            .ok_or_else(|| format!("unknown sub-type: {s}"))
    }
}

/// How the import service treats records that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    #[default]
    Append,
    Replace,
    Delete,
}

impl Behavior {
    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::Append => "append",
            Behavior::Replace => "replace",
            Behavior::Delete => "delete",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "append" => Ok(Behavior::Append),
            "replace" => Ok(Behavior::Replace),
            "delete" => Ok(Behavior::Delete),
            other => Err(format!("unknown import behavior: {other}")),
        }
    }
}

/// Blank values are missing values: null or the empty string.
pub(crate) fn is_blank(value: Option<&FieldValue>) -> bool {
    value.is_none_or(FieldValue::is_blank)
}

pub(crate) type Money = Decimal;
