//! Track catalog: where tracks come from, how they are named and which one
//! is current.

mod model;
mod scan;
mod title;

pub use model::*;
pub use scan::load_catalog;
