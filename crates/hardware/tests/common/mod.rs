//! Shared test fixtures.

use phsim_core::config::Config;
use phsim_core::layer::LayerShape;
use phsim_core::subsys::{Canned, MemCharacterization, MemoryBuffer};
use phsim_core::Accelerator;

/// A plausible SRAM characterization, used in place of a tool run.
pub fn canned_stats() -> MemCharacterization {
    MemCharacterization {
        latency: 2e-9,
        read_energy: 1e-10,
        write_energy: 2e-10,
        static_power: 1e-3,
        area: 5.0,
    }
}

/// Builds a buffer around [`canned_stats`].
pub fn canned_buffer(ports: u32) -> MemoryBuffer {
    MemoryBuffer::build(ports, &Canned(canned_stats())).unwrap()
}

/// Builds an accelerator with canned buffers (no external tool).
pub fn accelerator(config: &Config) -> Accelerator {
    Accelerator::with_buffers(config, canned_buffer(1), canned_buffer(2))
}

/// The reference layer used throughout the suite: 1024-pixel input
/// objects, 3×3 kernels, 3 input channels, 64 filters.
pub fn reference_layer() -> LayerShape {
    LayerShape {
        name: "conv1".to_string(),
        in_obj_size: 1024,
        out_obj_size: 256,
        in_channels: 3,
        out_channels: 64,
        kernel_size: 9,
        stride: 1,
    }
}
