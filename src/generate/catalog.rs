//! Generators for catalog structure: categories, attributes, attribute sets and their associations.

use rand::Rng;
use rand::rngs::StdRng;

use crate::domain::{EntityBatch, EntityRecord, FieldValue};

use super::{ADJECTIVES, NOUNS, pick, token};

const ROOT_CATEGORY: &str = "Default Category";
const ATTRIBUTE_GROUPS: &[&str] = &["General", "Prices", "Meta Information", "Design"];

// (backend type, frontend input)
const ATTRIBUTE_SHAPES: &[(&str, &str)] = &[
    ("varchar", "text"),
    ("int", "select"),
    ("decimal", "price"),
    ("text", "textarea"),
    ("int", "boolean"),
];

pub(super) fn categories(rng: &mut StdRng, count: usize) -> EntityBatch {
    (0..count)
        .map(|i| {
            let name = format!("{} {} {i}", pick(rng, ADJECTIVES), pick(rng, NOUNS));
            EntityRecord::new()
                .with("name", name.as_str())
                .with("_root", ROOT_CATEGORY)
                .with("_category", name.as_str())
                .with("description", format!("All things {}", name.to_lowercase()))
                .with("is_active", 1i64)
                .with("include_in_menu", i64::from(rng.gen_bool(0.8)))
                .with("is_anchor", 1i64)
                .with("available_sort_by", "position")
                .with("default_sort_by", "position")
        })
        .collect()
}

/// Attributes; select attributes are followed by one row per option.
pub(super) fn attributes(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 2);
    for i in 0..count {
        let (backend_type, input) = ATTRIBUTE_SHAPES[i % ATTRIBUTE_SHAPES.len()];
        let code = attribute_code(rng, i);
        rows.push(
            EntityRecord::new()
                .with("attribute_id", code.as_str())
                .with("type", backend_type)
                .with("input", input)
                .with("frontend_label", format!("Bench attribute {i}"))
                .with("global", 1i64)
                .with("visible", 1i64)
                .with("required", 0i64)
                .with("user_defined", 1i64)
                .with("searchable", i64::from(rng.gen_bool(0.5)))
                .with("filterable", 0i64),
        );
        if input == "select" {
            for option in 1..=3i64 {
                rows.push(
                    EntityRecord::new()
                        .with("attribute_id", FieldValue::Null)
                        .with("option_value", format!("{code} option {option}"))
                        .with("option_sort_order", option),
                );
            }
        }
    }
    rows
}

pub(super) fn attribute_sets(rng: &mut StdRng, count: usize) -> EntityBatch {
    (0..count)
        .map(|i| {
            EntityRecord::new()
                .with("attribute_set_name", format!("Bench set {i} {}", token(rng)))
                .with("sort_order", i as i64)
                .with("skeleton_set", "Default")
        })
        .collect()
}

/// Places attributes into groups of the default attribute set.
pub(super) fn attribute_associations(rng: &mut StdRng, count: usize) -> EntityBatch {
    (0..count)
        .map(|i| {
            EntityRecord::new()
                .with("attribute_id", attribute_code(rng, i))
                .with("attribute_set_id", 4i64)
                .with("attribute_group_name", pick(rng, ATTRIBUTE_GROUPS))
                .with("sort_order", i as i64)
        })
        .collect()
}

fn attribute_code(rng: &mut StdRng, i: usize) -> String {
    format!("bench_attr_{i}_{}", token(rng))
}
