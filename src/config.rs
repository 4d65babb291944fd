//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to tune the visualizer
//! and helpers to load configuration from disk and the environment.

mod load;
mod schema;

pub use schema::*;
