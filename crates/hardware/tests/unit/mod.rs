//! Unit tests for the simulator components.

/// Configuration defaults and deserialization tests.
pub mod config;
/// Pipeline state-machine and counter tests.
pub mod fsm;
/// Memory characterization tests.
pub mod memory;
/// Property-style tests for the derived-field algebra.
pub mod properties;
