//! Common types shared across the simulator.

/// Error types for construction, layer-table loading, and summarization.
pub mod error;

pub use error::{BuildError, ModelError, SummaryError};
