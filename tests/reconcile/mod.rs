//! Properties of the reconciliation steps: chunking, identity indexing and failure mapping.

use std::num::NonZeroUsize;

use bulk_import_bench::{
    EntityKind, EntityRecord, ErrorReport, Error, FieldValue, build_identity_index, chunk,
    failure_lines, map_failures,
};
use proptest::prelude::*;

/// Records with a running number so that reordering or duplication is visible.
fn batch(identities: &[Option<String>]) -> Vec<EntityRecord> {
    identities
        .iter()
        .enumerate()
        .map(|(i, identity)| {
            let sku = match identity {
                Some(sku) => FieldValue::from(sku.as_str()),
                None => FieldValue::Null,
            };
            EntityRecord::new().with("row", i as i64).with("sku", sku)
        })
        .collect()
}

fn identity_columns() -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[A-Z][0-9]{1,3}"), 0..60)
}

proptest! {
    #[test]
    fn concatenated_bulks_reproduce_the_batch(
        identities in identity_columns(),
        max in 1usize..25,
    ) {
        let batch = batch(&identities);
        let bulks = chunk(&batch, NonZeroUsize::new(max));

        let rejoined: Vec<EntityRecord> = bulks.iter().flat_map(|b| b.iter().cloned()).collect();
        prop_assert_eq!(&rejoined, &batch);

        prop_assert!(bulks.iter().all(|b| !b.is_empty() && b.len() <= max));
        if batch.len() > max {
            prop_assert!(bulks[..bulks.len() - 1].iter().all(|b| b.len() == max));
        }
    }

    #[test]
    fn small_or_unlimited_batches_are_one_bulk(
        identities in prop::collection::vec(prop::option::of("[a-z]{2}"), 1..30),
        slack in 0usize..10,
    ) {
        let batch = batch(&identities);
        for max in [None, NonZeroUsize::new(batch.len() + slack)] {
            let bulks = chunk(&batch, max);
            prop_assert_eq!(bulks.len(), 1);
            prop_assert_eq!(bulks[0], batch.as_slice());
        }
    }

    #[test]
    fn index_covers_every_position(identities in identity_columns()) {
        let batch = batch(&identities);
        let index = build_identity_index(&batch, EntityKind::Product).expect("products have skus");

        prop_assert_eq!(index.len(), batch.len());
        let mut last_seen = String::new();
        for (position, identity) in identities.iter().enumerate() {
            match identity {
                Some(sku) => {
                    prop_assert_eq!(index.get(position), Some(sku.as_str()));
                    last_seen.clone_from(sku);
                }
                None => {
                    let expected = format!("Associated to previous {last_seen}");
                    prop_assert_eq!(index.get(position), Some(expected.as_str()));
                }
            }
        }
    }

    #[test]
    fn every_reported_position_is_attributed(
        identities in identity_columns(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let batch = batch(&identities);
        prop_assume!(!batch.is_empty());
        let index = build_identity_index(&batch, EntityKind::Product).expect("products have skus");

        let positions: Vec<usize> = picks.iter().map(|p| p.index(batch.len())).collect();
        let report: ErrorReport = [("Invalid price", positions.clone())].into_iter().collect();
        let failures = map_failures(&report, &index).expect("positions are in range");

        for position in positions {
            let identity = index.get(position).expect("in range");
            prop_assert_eq!(failures.get(identity), Some("Invalid price"));
        }
    }

    #[test]
    fn out_of_range_positions_are_malformed(len in 0usize..20, beyond in 0usize..5) {
        let batch = batch(&vec![Some("A1".to_string()); len]);
        let index = build_identity_index(&batch, EntityKind::Product).expect("products have skus");
        let report: ErrorReport = [("Invalid price", vec![len + beyond])].into_iter().collect();

        let is_malformed = matches!(
            map_failures(&report, &index),
            Err(Error::MalformedErrorReport { position, bulk_len }) if position == len + beyond && bulk_len == len
        );
        prop_assert!(is_malformed);
    }
}

#[test]
fn documented_example_maps_to_identities() {
    let batch = batch(&[Some("A1".into()), None, Some("A2".into())]);
    let index = build_identity_index(&batch, EntityKind::Product).expect("products have skus");
    let report: ErrorReport =
        serde_json::from_str(r#"{"Invalid price":[1,2]}"#).expect("valid error report");

    let failures = map_failures(&report, &index).expect("positions are in range");
    let lines: Vec<String> = failure_lines(&failures).collect();

    assert_eq!(
        lines,
        [
            "Associated to previous A1 : Invalid price",
            "A2 : Invalid price",
        ]
    );
}

#[test]
fn attribute_and_category_identities() {
    let attributes = vec![
        EntityRecord::new().with("attribute_id", "color"),
        EntityRecord::new().with("option_value", "red"),
    ];
    let categories = vec![EntityRecord::new().with("name", "Shoes")];

    let attributes = build_identity_index(&attributes, EntityKind::Attributes).expect("supported");
    let categories = build_identity_index(&categories, EntityKind::Category).expect("supported");

    assert_eq!(attributes.get(1), Some("Associated to previous color"));
    assert_eq!(categories.get(0), Some("Shoes"));
    assert!(build_identity_index(&[], EntityKind::Customer).is_none());
}
