//! Per-layer energy and latency accounting.
//!
//! Triggered once per layer, at `Store`. Converts the accumulated run
//! counters into a finalized, immutable `LayerReport` using the fixed
//! subsystem characterizations and the cost models chosen at construction.

use crate::accel::counters::{mean_inefficiency, RunCounters};
use crate::config::{CostModelKind, DomainToggles, EnergyConfig, OverrideCosts};
use crate::layer::LayerDescriptor;
use crate::subsys::{DigitalSubsystem, MemoryBuffer, PhotonicSubsystem};

/// Finalized, immutable snapshot of one layer's run.
///
/// Appended once per layer to the accelerator's report sequence; never
/// mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerReport {
    /// Layer name tag.
    pub name: String,
    /// Simulated cycles for the layer.
    pub cycles: u64,
    /// Total wall-clock latency in seconds (`critical_path × cycles`).
    pub latency: f64,
    /// Photonic measurement energy in joules.
    pub photonic_energy: f64,
    /// Digital peripheral energy in joules (characterized model).
    pub digital_energy: f64,
    /// DAC conversion energy in joules (override model).
    pub dac_energy: f64,
    /// ADC conversion energy in joules (override model).
    pub adc_energy: f64,
    /// Object buffer energy in joules.
    pub object_energy: f64,
    /// Kernel buffer energy in joules.
    pub kernel_energy: f64,
    /// Sum of all domain energies in joules.
    pub total_energy: f64,
    /// Multiply-accumulate operations performed.
    pub ops: u64,
    /// Metasurface occupancy of one pass, in [0, 1].
    pub utilization: f64,
    /// Object buffer read accesses.
    pub obj_reads: u64,
    /// Object buffer write accesses.
    pub obj_writes: u64,
    /// Kernel buffer read accesses.
    pub kern_reads: u64,
    /// FFT/convolution operations performed.
    pub fft_convs: u64,
    /// Mean buffer-width inefficiency of object reads.
    pub obj_read_inefficiency: f64,
    /// Mean buffer-width inefficiency of object writes.
    pub obj_write_inefficiency: f64,
    /// Mean buffer-width inefficiency of kernel reads.
    pub kern_read_inefficiency: f64,
}

/// Converts run counters into layer reports.
///
/// The cost models and override constants are resolved once at accelerator
/// construction; no configuration is consulted afterward.
#[derive(Debug, Clone)]
pub struct Accountant {
    digital_model: CostModelKind,
    memory_model: CostModelKind,
    overrides: OverrideCosts,
    domains: DomainToggles,
    access_width: u64,
}

impl Accountant {
    /// Builds an accountant from the energy configuration.
    pub fn new(energy: &EnergyConfig, access_width: u64) -> Self {
        Self {
            digital_model: energy.digital_model,
            memory_model: energy.memory_model,
            overrides: energy.overrides.clone(),
            domains: energy.domains.clone(),
            access_width,
        }
    }

    /// Assembles the layer report from the finished run's counters.
    #[allow(clippy::too_many_arguments)]
    pub fn finalize(
        &self,
        layer: &LayerDescriptor,
        counters: &RunCounters,
        photonic: &PhotonicSubsystem,
        digital: &DigitalSubsystem,
        kernel_buffer: &MemoryBuffer,
        object_buffer: &MemoryBuffer,
        cycle_time: f64,
    ) -> LayerReport {
        let latency = cycle_time * counters.cycles as f64;
        let width = self.access_width as f64;

        let photonic_energy = if self.domains.photonic {
            counters.fft_convs as f64 * photonic.measurement_energy
        } else {
            0.0
        };

        let (digital_energy, dac_energy, adc_energy) = if self.domains.digital {
            match self.digital_model {
                CostModelKind::Characterized => (latency * digital.avg_power, 0.0, 0.0),
                CostModelKind::Override => {
                    // DAC traffic is everything presented to the array (object
                    // and kernel reads); ADC traffic is everything read out.
                    let read_bytes = (counters.obj_reads + counters.kern_reads) as f64 * width;
                    let write_bytes = counters.obj_writes as f64 * width;
                    (
                        0.0,
                        read_bytes * self.overrides.dac_energy_per_byte,
                        write_bytes * self.overrides.adc_energy_per_byte,
                    )
                }
            }
        } else {
            (0.0, 0.0, 0.0)
        };

        let object_energy = if self.domains.object_buffer {
            match self.memory_model {
                CostModelKind::Characterized => {
                    counters.obj_reads as f64 * object_buffer.stats.read_energy
                        + counters.obj_writes as f64 * object_buffer.stats.write_energy
                        + latency * object_buffer.stats.static_power
                }
                CostModelKind::Override => {
                    counters.obj_reads as f64 * width * self.overrides.read_energy_per_byte
                        + counters.obj_writes as f64 * width * self.overrides.write_energy_per_byte
                }
            }
        } else {
            0.0
        };

        let kernel_energy = if self.domains.kernel_buffer {
            match self.memory_model {
                CostModelKind::Characterized => {
                    counters.kern_reads as f64 * kernel_buffer.stats.read_energy
                        + latency * kernel_buffer.stats.static_power
                }
                CostModelKind::Override => {
                    counters.kern_reads as f64 * width * self.overrides.read_energy_per_byte
                }
            }
        } else {
            0.0
        };

        LayerReport {
            name: layer.shape.name.clone(),
            cycles: counters.cycles,
            latency,
            photonic_energy,
            digital_energy,
            dac_energy,
            adc_energy,
            object_energy,
            kernel_energy,
            total_energy: photonic_energy
                + digital_energy
                + dac_energy
                + adc_energy
                + object_energy
                + kernel_energy,
            ops: layer.ops,
            utilization: layer.utilization(photonic.ms_pix),
            obj_reads: counters.obj_reads,
            obj_writes: counters.obj_writes,
            kern_reads: counters.kern_reads,
            fft_convs: counters.fft_convs,
            obj_read_inefficiency: mean_inefficiency(&counters.obj_read_inefficiency),
            obj_write_inefficiency: mean_inefficiency(&counters.obj_write_inefficiency),
            kern_read_inefficiency: mean_inefficiency(&counters.kern_read_inefficiency),
        }
    }
}
