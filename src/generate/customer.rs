//! Customer generator: one head row per customer plus a shipping address row.

use rand::Rng;
use rand::rngs::StdRng;

use crate::domain::{EntityBatch, EntityRecord, FieldValue};

use super::pick;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Chloe", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas", "Keiko",
    "Luca", "Maya", "Nils", "Olga", "Pablo",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bakker", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Hansen", "Ivanova",
    "Jansen", "Kowalski", "Laurent", "Moreau", "Novak",
];

const CITIES: &[(&str, &str)] = &[
    ("Amsterdam", "NL"),
    ("Berlin", "DE"),
    ("Lyon", "FR"),
    ("Porto", "PT"),
    ("Krakow", "PL"),
    ("Austin", "US"),
];

/// Customers with their default address, followed by a shipping address row.
pub(super) fn customers(rng: &mut StdRng, count: usize) -> EntityBatch {
    let mut rows = Vec::with_capacity(count * 2);
    for i in 0..count {
        let firstname = pick(rng, FIRST_NAMES);
        let lastname = pick(rng, LAST_NAMES);
        let email = format!(
            "{}.{}.{i}@example.com",
            firstname.to_lowercase(),
            lastname.to_lowercase()
        );

        let head = EntityRecord::new()
            .with("email", email)
            .with("_website", "base")
            .with("_store", "default")
            .with("group_id", 1i64)
            .with("firstname", firstname)
            .with("lastname", lastname)
            .with("website_id", 1i64)
            .with("store_id", 1i64)
            .with("created_in", "Default Store View");
        rows.push(with_address(rng, head, firstname, lastname, true));

        let shipping = EntityRecord::new().with("email", FieldValue::Null);
        rows.push(with_address(rng, shipping, firstname, lastname, false));
    }
    rows
}

fn with_address(
    rng: &mut StdRng,
    record: EntityRecord,
    firstname: &str,
    lastname: &str,
    billing: bool,
) -> EntityRecord {
    let (city, country) = CITIES[rng.gen_range(0..CITIES.len())];
    record
        .with("_address_firstname", firstname)
        .with("_address_lastname", lastname)
        .with(
            "_address_street",
            format!("{} Market Street", rng.gen_range(1..400)),
        )
        .with("_address_city", city)
        .with("_address_postcode", format!("{:05}", rng.gen_range(1000..99_999)))
        .with("_address_country_id", country)
        .with(
            "_address_telephone",
            format!("+1 555 {:04}", rng.gen_range(0..10_000)),
        )
        .with("_address_default_billing_", i64::from(billing))
        .with("_address_default_shipping_", i64::from(!billing))
}
