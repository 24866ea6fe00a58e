//! Photonic CNN accelerator performance simulator library.
//!
//! This crate implements a cycle-level latency/energy/throughput model of a
//! convolutional-network accelerator built from three cooperating physical
//! subsystems, with the following parts:
//! 1. **Subsystems:** Photonic metasurface, digital peripheral circuitry, and
//!    memory buffers characterized by the external CACTI tool.
//! 2. **Core:** The pipeline state machine driving one layer through
//!    load/convolve/store phases, with per-cycle access and operation counts.
//! 3. **Accounting:** Per-layer latency/energy conversion under pluggable
//!    cost models, plus lifetime aggregation (TOPS, TOPS/W, utilization).
//! 4. **Simulation:** Layer-table loading, configuration, and statistics.

/// The accelerator: state machine, counters, accounting, critical path.
pub mod accel;
/// Common types and errors.
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Layer shapes and derived scheduling fields.
pub mod layer;
/// Layer-table loading.
pub mod sim;
/// Lifetime statistics aggregation and export rows.
pub mod stats;
/// Fixed subsystem characterizations.
pub mod subsys;

/// Main accelerator type; construct with `Accelerator::new`.
pub use crate::accel::Accelerator;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Run-wide aggregate statistics.
pub use crate::stats::LifetimeSummary;
