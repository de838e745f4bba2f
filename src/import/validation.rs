//! Row validation performed by the in-process import service.

use crate::domain::{
    Behavior, EntityKind, EntityRecord, ErrorReport, FieldValue, Money, is_blank,
};

pub(crate) const ORPHAN_ROW: &str = "Row is not associated with any entity";

const PRODUCT_TYPES: [&str; 6] = [
    "simple",
    "configurable",
    "bundle",
    "grouped",
    "virtual",
    "downloadable",
];
const ATTRIBUTE_BACKEND_TYPES: [&str; 5] = ["varchar", "int", "decimal", "text", "datetime"];

/// Field that starts a new entity. Rows without it extend the entity above them.
fn head_field(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Product => "sku",
        EntityKind::Customer => "email",
        EntityKind::Category => "name",
        EntityKind::Attributes | EntityKind::AttributeAssociations => "attribute_id",
        EntityKind::AttributeSets => "attribute_set_name",
    }
}

/// Validates `records` and groups the failing positions by message.
/// An empty report means every row is acceptable.
pub(crate) fn validate(
    kind: EntityKind,
    behavior: Behavior,
    records: &[EntityRecord],
) -> ErrorReport {
    let head = head_field(kind);
    let mut report = ErrorReport::new();
    let mut inside_entity = false;

    for (position, record) in records.iter().enumerate() {
        if is_blank(record.get(head)) {
            if !inside_entity {
                report.record(ORPHAN_ROW, position);
            }
            continue;
        }
        inside_entity = true;

        // deleting only needs to know which entity is meant
        if behavior == Behavior::Delete {
            continue;
        }
        if let Err(message) = validate_head_row(kind, record) {
            report.record(&message, position);
        }
    }

    report
}

fn validate_head_row(kind: EntityKind, record: &EntityRecord) -> Result<(), String> {
    match kind {
        EntityKind::Product => {
            one_of(record, "_type", &PRODUCT_TYPES)?;
            required(record, "name")?;
            let price = required(record, "price")?;
            match price.as_decimal() {
                Some(price) if price >= Money::ZERO => Ok(()),
                _ => Err(invalid("price")),
            }
        }
        EntityKind::Customer => {
            let email = required(record, "email")?.to_string();
            if !looks_like_email(&email) {
                return Err(invalid("email"));
            }
            required(record, "_website")?;
            required(record, "firstname")?;
            required(record, "lastname")?;
            Ok(())
        }
        EntityKind::Category => required(record, "_root").map(drop),
        EntityKind::Attributes => {
            one_of(record, "type", &ATTRIBUTE_BACKEND_TYPES)?;
            required(record, "frontend_label").map(drop)
        }
        EntityKind::AttributeSets => integer(record, "sort_order"),
        EntityKind::AttributeAssociations => {
            integer(record, "attribute_set_id")?;
            required(record, "attribute_group_name").map(drop)
        }
    }
}

fn required<'r>(record: &'r EntityRecord, field: &str) -> Result<&'r FieldValue, String> {
    record
        .get(field)
        .filter(|value| !value.is_blank())
        .ok_or_else(|| format!("Required field '{field}' has an empty value"))
}

fn one_of(record: &EntityRecord, field: &str, allowed: &[&str]) -> Result<(), String> {
    let value = required(record, field)?.to_string();
    if allowed.contains(&value.as_str()) {
        Ok(())
    } else {
        Err(invalid(field))
    }
}

fn integer(record: &EntityRecord, field: &str) -> Result<(), String> {
    required(record, field)?
        .as_integer()
        .map(drop)
        .ok_or_else(|| invalid(field))
}

fn invalid(field: &str) -> String {
    format!("Invalid value in '{field}' column")
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
