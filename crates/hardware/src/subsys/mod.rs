//! Subsystem characterizations.
//!
//! Each submodule derives a fixed `(latency, energy/power, area)` tuple for
//! one physical subsystem of the accelerator, once, at construction:
//! 1. **Photonic:** Metasurface measurement energy from physical constants.
//! 2. **Digital:** DAC/ADC rows, bit-line selector, and peripheral roll-up.
//! 3. **Memory:** Buffer characterization via the external tool or fixed values.
//!
//! All characterizations are immutable after construction and shared
//! read-only by the accountant.

/// Digital peripheral circuitry characterization.
pub mod digital;
/// Memory buffer characterization and the external-tool capability interface.
pub mod memory;
/// Photonic (metasurface) characterization.
pub mod photonic;

pub use digital::DigitalSubsystem;
pub use memory::{
    parse_tool_output, CactiTool, Canned, Characterize, MemCharacterization, MemoryBuffer,
};
pub use photonic::PhotonicSubsystem;
