//! Simulation drivers and input loading.

/// Layer-table loading.
pub mod loader;

pub use loader::load_layer_table;
