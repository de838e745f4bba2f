//! Product generators, one per product shape.

use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use crate::domain::{EntityBatch, EntityRecord, FieldValue, Money};

use super::{display_name, pick, token};

const COLORS: &[&str] = &["red", "blue", "green", "black", "white"];
const SIZES: &[&str] = &["S", "M", "L", "XL"];
const STORE_VIEWS: &[&str] = &["french", "german"];

pub(super) fn simple(rng: &mut StdRng, count: usize) -> EntityBatch {
    (0..count)
        .map(|i| {
            let sku = sku(rng, "simple", i);
            head_row(rng, &sku, "simple")
        })
        .collect()
}

/// Simple products where every few rows carry data the import service must reject.
pub(super) fn simple_fail(rng: &mut StdRng, count: usize) -> EntityBatch {
    (0..count)
        .map(|i| {
            let sku = sku(rng, "fail", i);
            let mut row = head_row(rng, &sku, "simple");
            match i % 7 {
                2 => row.set("price", "free"),
                4 => row.set("name", ""),
                6 => row.set("price", Money::new(-100, 2)),
                _ => {}
            }
            row
        })
        .collect()
}

/// Configurable products, followed by one row per super attribute option.
pub(super) fn configurable(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 3);
    for i in 0..count {
        let parent = sku(rng, "conf", i);
        rows.push(head_row(rng, &parent, "configurable").with("has_options", 1i64));
        for size in SIZES.iter().take(2) {
            rows.push(
                continuation_row()
                    .with("_super_products_sku", format!("{parent}-{}", size.to_lowercase()))
                    .with("_super_attribute_code", "size")
                    .with("_super_attribute_option", *size)
                    .with("_super_attribute_price_corr", price(rng) / Decimal::TEN),
            );
        }
    }
    rows
}

/// Bundle products with two options each.
pub(super) fn bundle(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 3);
    for i in 0..count {
        let parent = sku(rng, "bundle", i);
        rows.push(
            head_row(rng, &parent, "bundle")
                .with("price_type", 0i64)
                .with("price_view", 0i64),
        );
        for option in 1..=2i64 {
            rows.push(
                continuation_row()
                    .with("bundle_option_title", format!("Option {option}"))
                    .with("bundle_option_type", "select")
                    .with("bundle_option_required", 1i64)
                    .with("bundle_selection_sku", format!("{parent}-part-{option}"))
                    .with("bundle_selection_qty", 1i64),
            );
        }
    }
    rows
}

/// Grouped products with two associated products each.
pub(super) fn grouped(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 3);
    for i in 0..count {
        let parent = sku(rng, "grouped", i);
        rows.push(head_row(rng, &parent, "grouped"));
        for member in 1..=2 {
            rows.push(
                continuation_row()
                    .with("_associated_sku", format!("{parent}-member-{member}"))
                    .with("_associated_default_qty", 1i64)
                    .with("_associated_position", member as i64),
            );
        }
    }
    rows
}

/// Simple products with a base image and two additional gallery rows.
pub(super) fn image(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 3);
    for i in 0..count {
        let sku = sku(rng, "image", i);
        let base = format!("/{}/{}/{sku}.jpg", &sku[..1], &sku[1..2]);
        rows.push(
            head_row(rng, &sku, "simple")
                .with("_media_image", base.as_str())
                .with("_media_attribute_id", 88i64)
                .with("_media_is_disabled", 0i64)
                .with("_media_position", 1i64)
                .with("image", base.as_str())
                .with("small_image", base.as_str())
                .with("thumbnail", base.as_str()),
        );
        for position in 2..=3i64 {
            rows.push(
                continuation_row()
                    .with("_media_image", format!("/gallery/{sku}-{position}.jpg"))
                    .with("_media_attribute_id", 88i64)
                    .with("_media_is_disabled", 0i64)
                    .with("_media_position", position),
            );
        }
    }
    rows
}

/// Simple products with translated names for each store view.
pub(super) fn localizable(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * (1 + STORE_VIEWS.len()));
    for i in 0..count {
        let sku = sku(rng, "local", i);
        let head = head_row(rng, &sku, "simple");
        let name = head.get("name").map(ToString::to_string).unwrap_or_default();
        rows.push(head);
        for store in STORE_VIEWS {
            rows.push(
                continuation_row()
                    .with("_store", *store)
                    .with("name", format!("{name} ({store})"))
                    .with("description", format!("{name} for the {store} store view")),
            );
        }
    }
    rows
}

fn sku(rng: &mut StdRng, prefix: &str, i: usize) -> String {
    format!("{prefix}-{i:06}-{}", token(rng))
}

fn price(rng: &mut StdRng) -> Money {
    Money::new(rng.gen_range(100..100_000), 2)
}

fn head_row(rng: &mut StdRng, sku: &str, product_type: &str) -> EntityRecord {
    let name = display_name(rng);
    EntityRecord::new()
        .with("sku", sku)
        .with("_type", product_type)
        .with("_attribute_set", "Default")
        .with("_product_websites", "base")
        .with("name", name.as_str())
        .with("description", format!("{name}, {} edition", pick(rng, COLORS)))
        .with("short_description", name.as_str())
        .with("weight", Money::new(rng.gen_range(1..5_000), 3))
        .with("price", price(rng))
        .with("status", 1i64)
        .with("visibility", 4i64)
        .with("tax_class_id", 2i64)
        .with("qty", rng.gen_range(0..1_000i64))
        .with("is_in_stock", 1i64)
}

fn continuation_row() -> EntityRecord {
    EntityRecord::new().with("sku", FieldValue::Null)
}
