//! Data models
//!
//! Rust structs for the flat-file records and the date type they share.

mod batch;
mod date;
mod draft;
mod extra;
mod nutrition;
mod product;
mod weight;

pub use batch::{Batch, BATCHES_HEADER};
pub use date::{check_day_span, CivilDate, MAX_DAY_SPAN};
pub use draft::{Draft, DraftItem, DraftMeta};
pub use extra::{Extra, EXTRAS_HEADER};
pub use nutrition::Nutrition;
pub use product::{parse_qty_unit, Product, Unit};
pub use weight::{
    kg_to_lb, lb_to_kg, parse_weight_kg, WeightEntry, LB_PER_KG, WEIGHTS_HEADER,
};
