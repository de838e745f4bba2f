//! Deterministic generation of benchmark entities.
//!
//! Generators are looked up in a static table keyed by entity kind and sub-type. A run plan is
//! resolved against this table before anything is generated, so an unsupported combination
//! fails at configuration time.

use rand::Rng;
use rand::rngs::StdRng;

use crate::{
    Error,
    config::Selector,
    domain::{EntityBatch, EntityKind, SubType},
};

mod catalog;
mod customer;
mod product;


/// Produces `count` logical entities. Composite entities may span several rows.
pub type GeneratorFn = fn(&mut StdRng, usize) -> EntityBatch;

const GENERATORS: &[(EntityKind, SubType, GeneratorFn)] = &[
    (EntityKind::Product, SubType::Simple, product::simple),
    (EntityKind::Product, SubType::SimpleFail, product::simple_fail),
    (EntityKind::Product, SubType::Configurable, product::configurable),
    (EntityKind::Product, SubType::Bundle, product::bundle),
    (EntityKind::Product, SubType::Grouped, product::grouped),
    (EntityKind::Product, SubType::Image, product::image),
    (EntityKind::Product, SubType::Localizable, product::localizable),
    (EntityKind::AttributeSets, SubType::Standard, catalog::attribute_sets),
    (EntityKind::Attributes, SubType::Standard, catalog::attributes),
    (
        EntityKind::AttributeAssociations,
        SubType::Standard,
        catalog::attribute_associations,
    ),
    (EntityKind::Customer, SubType::Standard, customer::customers),
    (EntityKind::Category, SubType::Standard, catalog::categories),
];

/// Looks up the generator for `kind` and `sub_type`.
pub fn generator_for(kind: EntityKind, sub_type: SubType) -> Option<GeneratorFn> {
    GENERATORS
        .iter()
        .find(|(k, s, _)| *k == kind && *s == sub_type)
        .map(|(_, _, generator)| *generator)
}

/// One batch of a run: what to generate and how.
#[derive(Debug, Clone, Copy)]
pub struct PlannedBatch {
    pub kind: EntityKind,
    pub sub_type: SubType,
    pub generator: GeneratorFn,
}

/// Resolves the batches of a run. An empty selection plans every kind with its default sub-types.
pub fn plan(selection: &[Selector]) -> Result<Vec<PlannedBatch>, Error> {
    let defaults: Vec<Selector> = EntityKind::ALL.into_iter().map(Selector::kind).collect();
    let selection: &[Selector] = if selection.is_empty() {
        &defaults
    } else {
        selection
    };

    let mut batches = Vec::new();
    for selector in selection {
        let sub_types = match selector.sub_type {
            Some(sub_type) => vec![sub_type],
            None => selector.kind.sub_types().to_vec(),
        };
        for sub_type in sub_types {
            let generator = generator_for(selector.kind, sub_type).ok_or(
                Error::UnknownGenerator {
                    kind: selector.kind,
                    sub_type,
                },
            )?;
            batches.push(PlannedBatch {
                kind: selector.kind,
                sub_type,
                generator,
            });
        }
    }
    Ok(batches)
}

const ADJECTIVES: &[&str] = &[
    "Classic", "Urban", "Vintage", "Modern", "Compact", "Deluxe", "Rugged", "Slim", "Premium",
    "Eco", "Bold", "Soft", "Bright", "Midnight", "Arctic", "Golden", "Silver", "Crimson",
    "Coastal", "Alpine",
];

const NOUNS: &[&str] = &[
    "Shirt", "Jacket", "Sneaker", "Backpack", "Lamp", "Chair", "Kettle", "Watch", "Scarf",
    "Headphones", "Wallet", "Mug", "Blanket", "Notebook", "Bottle", "Sunglasses", "Helmet",
    "Umbrella", "Candle", "Speaker",
];

/// Pseudo random display name, e.g. "Urban Kettle".
fn display_name(rng: &mut StdRng) -> String {
    format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS))
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// Lower case token used to keep generated codes unique between runs with different seeds.
fn token(rng: &mut StdRng) -> String {
    format!("{:06x}", rng.gen_range(0..0x100_0000u32))
}
