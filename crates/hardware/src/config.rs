//! Configuration system for the accelerator simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline hardware constants (metasurface, converters, buffers).
//! 2. **Structures:** Hierarchical config for general, photonic, digital, memory,
//!    energy accounting, and critical-path selection.
//! 3. **Enums:** Cost-model, critical-path policy, and characterization-source types.
//!
//! Configuration is supplied via JSON (`serde_json`) or `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline accelerator configuration when not
/// explicitly overridden in a JSON configuration file.
mod defaults {
    /// Metasurface side length in pixels (the optical array is square).
    ///
    /// Total pixel count `MS_pix` is this value squared; it bounds how many
    /// input channels can share one optical pass.
    pub const MS_DIM: u64 = 1000;

    /// Precision of each metasurface pixel in bits.
    ///
    /// Drives the photon budget: reaching `Nb` bits of precision against shot
    /// noise requires `(2/3) * 2^(2*Nb)` photons per pixel.
    pub const PIXEL_BITS: u32 = 8;

    /// Time for one optical measurement in seconds (LC switching speed).
    pub const MEASUREMENT_TIME: f64 = 1e-6;

    /// Number of metasurface rows/columns shared by one DAC.
    pub const DAC_GROUP_SIZE: u64 = 1;

    /// Number of metasurface rows/columns shared by one ADC.
    pub const ADC_GROUP_SIZE: u64 = 1;

    /// Memory access width in bytes (one buffer line).
    ///
    /// Requests are rounded up to whole lines; the rounding ratio is recorded
    /// as buffer-width inefficiency.
    pub const ACCESS_WIDTH: u64 = 1024;

    /// Number of independent banks per memory buffer.
    pub const BANKS: u64 = 1;

    /// Kernel buffer port count (single shared read/write port).
    pub const KERNEL_PORTS: u32 = 1;

    /// Object buffer port count (one read port, one write port).
    pub const OBJECT_PORTS: u32 = 2;

    /// Fallback buffer access time in seconds when no tool run is configured.
    pub const MEM_LATENCY: f64 = 2e-9;

    /// Fallback dynamic read energy per access in joules.
    pub const MEM_READ_ENERGY: f64 = 1e-9;

    /// Fallback dynamic write energy per access in joules.
    pub const MEM_WRITE_ENERGY: f64 = 1e-9;

    /// Fallback leakage power per buffer in watts.
    pub const MEM_STATIC_POWER: f64 = 1e-3;

    /// Fallback data-array area in mm².
    pub const MEM_AREA: f64 = 10.0;

    /// Override-model DAC conversion energy per byte in joules.
    pub const DAC_ENERGY_PER_BYTE: f64 = 1e-12;

    /// Override-model ADC conversion energy per byte in joules.
    pub const ADC_ENERGY_PER_BYTE: f64 = 1e-12;

    /// Override-model buffer read energy per byte in joules.
    pub const READ_ENERGY_PER_BYTE: f64 = 1e-12;

    /// Override-model buffer write energy per byte in joules.
    pub const WRITE_ENERGY_PER_BYTE: f64 = 1e-12;
}

/// Energy cost-model selection for a domain.
///
/// Chosen once at construction and injected into the accountant; the digital
/// and memory domains are selected independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CostModelKind {
    /// Use the characterized subsystem values (average power, per-access
    /// energies, leakage).
    #[default]
    Characterized,
    /// Use fixed per-byte energy constants, bypassing the characterized
    /// values entirely.
    Override,
}

/// Critical-path selection policy.
///
/// Determines the fixed wall-clock duration of one simulated cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CriticalPathPolicy {
    /// `max(photonic, digital)`: buffer latency assumed fully hidden by
    /// decoupling buffers.
    #[serde(alias = "Decoupled")]
    Buffered,
    /// `max(photonic, digital, scaled kernel-buffer, scaled object-buffer)`,
    /// where each buffer latency is scaled by `MS_pix / access_width / banks`.
    #[default]
    Full,
    /// Use the explicitly supplied `override_latency` constant.
    Override,
}

/// Source of a memory buffer's characterization values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum CharacterizationSource {
    /// Invoke the external CACTI tool against a technology config file and
    /// parse its output.
    Cacti {
        /// Directory containing the `cacti` executable.
        tool_dir: String,
        /// Technology/config file handed to `cacti -infile`.
        config_file: String,
    },
    /// Use fixed, caller-supplied values (no external tool run).
    Fixed {
        /// Access time in seconds.
        latency: f64,
        /// Dynamic read energy per access in joules.
        read_energy: f64,
        /// Dynamic write energy per access in joules.
        write_energy: f64,
        /// Leakage power in watts.
        static_power: f64,
        /// Data-array area in mm².
        area: f64,
    },
}

impl Default for CharacterizationSource {
    fn default() -> Self {
        Self::Fixed {
            latency: defaults::MEM_LATENCY,
            read_energy: defaults::MEM_READ_ENERGY,
            write_energy: defaults::MEM_WRITE_ENERGY,
            static_power: defaults::MEM_STATIC_POWER,
            area: defaults::MEM_AREA,
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use phsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.photonic.ms_dim, 1000);
/// assert_eq!(config.memory.access_width, 1024);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Photonic (metasurface) subsystem parameters.
    #[serde(default)]
    pub photonic: PhotonicConfig,
    /// Digital peripheral circuitry parameters.
    #[serde(default)]
    pub digital: DigitalConfig,
    /// Memory hierarchy parameters.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Energy accounting configuration.
    #[serde(default)]
    pub energy: EnergyConfig,
    /// Critical-path selection configuration.
    #[serde(default)]
    pub critical_path: CriticalPathConfig,
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Log each finalized layer report as it is produced.
    #[serde(default)]
    pub trace_layers: bool,
}

/// Photonic subsystem configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotonicConfig {
    /// Metasurface side length in pixels.
    #[serde(default = "PhotonicConfig::default_ms_dim")]
    pub ms_dim: u64,

    /// Per-pixel precision in bits.
    #[serde(default = "PhotonicConfig::default_pixel_bits")]
    pub pixel_bits: u32,

    /// Measurement time in seconds.
    #[serde(default = "PhotonicConfig::default_measurement_time")]
    pub measurement_time: f64,
}

impl PhotonicConfig {
    /// Returns the default metasurface side length.
    fn default_ms_dim() -> u64 {
        defaults::MS_DIM
    }

    /// Returns the default per-pixel precision.
    fn default_pixel_bits() -> u32 {
        defaults::PIXEL_BITS
    }

    /// Returns the default measurement time.
    fn default_measurement_time() -> f64 {
        defaults::MEASUREMENT_TIME
    }

    /// Total metasurface pixel count (`ms_dim` squared).
    pub fn ms_pix(&self) -> u64 {
        self.ms_dim * self.ms_dim
    }
}

impl Default for PhotonicConfig {
    fn default() -> Self {
        Self {
            ms_dim: defaults::MS_DIM,
            pixel_bits: defaults::PIXEL_BITS,
            measurement_time: defaults::MEASUREMENT_TIME,
        }
    }
}

/// Digital peripheral circuitry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DigitalConfig {
    /// Number of metasurface rows/columns shared by one DAC.
    #[serde(default = "DigitalConfig::default_dac_group")]
    pub dac_group_size: u64,

    /// Number of metasurface rows/columns shared by one ADC.
    #[serde(default = "DigitalConfig::default_adc_group")]
    pub adc_group_size: u64,
}

impl DigitalConfig {
    /// Returns the default DAC group size.
    fn default_dac_group() -> u64 {
        defaults::DAC_GROUP_SIZE
    }

    /// Returns the default ADC group size.
    fn default_adc_group() -> u64 {
        defaults::ADC_GROUP_SIZE
    }
}

impl Default for DigitalConfig {
    fn default() -> Self {
        Self {
            dac_group_size: defaults::DAC_GROUP_SIZE,
            adc_group_size: defaults::ADC_GROUP_SIZE,
        }
    }
}

/// Memory hierarchy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Access width in bytes shared by both buffers.
    #[serde(default = "MemoryConfig::default_access_width")]
    pub access_width: u64,

    /// Bank count shared by both buffers.
    #[serde(default = "MemoryConfig::default_banks")]
    pub banks: u64,

    /// Kernel buffer configuration.
    #[serde(default = "BufferConfig::default_kernel")]
    pub kernel_buffer: BufferConfig,

    /// Object buffer configuration.
    #[serde(default = "BufferConfig::default_object")]
    pub object_buffer: BufferConfig,
}

impl MemoryConfig {
    /// Returns the default access width in bytes.
    fn default_access_width() -> u64 {
        defaults::ACCESS_WIDTH
    }

    /// Returns the default bank count.
    fn default_banks() -> u64 {
        defaults::BANKS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            access_width: defaults::ACCESS_WIDTH,
            banks: defaults::BANKS,
            kernel_buffer: BufferConfig::default_kernel(),
            object_buffer: BufferConfig::default_object(),
        }
    }
}

/// Individual memory buffer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BufferConfig {
    /// Port count: 1 (shared read/write) or 2 (one read, one write).
    pub ports: u32,

    /// Where the buffer's characterization values come from.
    #[serde(default)]
    pub source: CharacterizationSource,
}

impl BufferConfig {
    /// Default kernel buffer: single-ported (reads only during a run).
    fn default_kernel() -> Self {
        Self {
            ports: defaults::KERNEL_PORTS,
            source: CharacterizationSource::default(),
        }
    }

    /// Default object buffer: dual-ported (read and write each cycle).
    fn default_object() -> Self {
        Self {
            ports: defaults::OBJECT_PORTS,
            source: CharacterizationSource::default(),
        }
    }
}

/// Energy accounting configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnergyConfig {
    /// Cost model for the digital (DAC/ADC/peripheral) domain.
    #[serde(default)]
    pub digital_model: CostModelKind,

    /// Cost model for the memory (object/kernel buffer) domain.
    #[serde(default)]
    pub memory_model: CostModelKind,

    /// Per-byte energy constants used by the override cost model.
    #[serde(default)]
    pub overrides: OverrideCosts,

    /// Per-domain enable flags.
    #[serde(default)]
    pub domains: DomainToggles,
}

/// Fixed per-byte energy constants for the override cost model.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideCosts {
    /// DAC conversion energy per byte in joules.
    #[serde(default = "OverrideCosts::default_dac")]
    pub dac_energy_per_byte: f64,

    /// ADC conversion energy per byte in joules.
    #[serde(default = "OverrideCosts::default_adc")]
    pub adc_energy_per_byte: f64,

    /// Buffer read energy per byte in joules.
    #[serde(default = "OverrideCosts::default_read")]
    pub read_energy_per_byte: f64,

    /// Buffer write energy per byte in joules.
    #[serde(default = "OverrideCosts::default_write")]
    pub write_energy_per_byte: f64,
}

impl OverrideCosts {
    /// Returns the default DAC energy per byte.
    fn default_dac() -> f64 {
        defaults::DAC_ENERGY_PER_BYTE
    }

    /// Returns the default ADC energy per byte.
    fn default_adc() -> f64 {
        defaults::ADC_ENERGY_PER_BYTE
    }

    /// Returns the default read energy per byte.
    fn default_read() -> f64 {
        defaults::READ_ENERGY_PER_BYTE
    }

    /// Returns the default write energy per byte.
    fn default_write() -> f64 {
        defaults::WRITE_ENERGY_PER_BYTE
    }
}

impl Default for OverrideCosts {
    fn default() -> Self {
        Self {
            dac_energy_per_byte: defaults::DAC_ENERGY_PER_BYTE,
            adc_energy_per_byte: defaults::ADC_ENERGY_PER_BYTE,
            read_energy_per_byte: defaults::READ_ENERGY_PER_BYTE,
            write_energy_per_byte: defaults::WRITE_ENERGY_PER_BYTE,
        }
    }
}

/// Per-domain enable flags.
///
/// A disabled domain contributes zero energy to every layer report; all
/// access counting still happens so that cycle counts are unaffected.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainToggles {
    /// Photonic measurement energy.
    #[serde(default = "DomainToggles::enabled")]
    pub photonic: bool,

    /// Digital peripheral energy (covers DAC/ADC in both cost models).
    #[serde(default = "DomainToggles::enabled")]
    pub digital: bool,

    /// Object buffer energy.
    #[serde(default = "DomainToggles::enabled")]
    pub object_buffer: bool,

    /// Kernel buffer energy.
    #[serde(default = "DomainToggles::enabled")]
    pub kernel_buffer: bool,
}

impl DomainToggles {
    /// Domains default to enabled.
    fn enabled() -> bool {
        true
    }
}

impl Default for DomainToggles {
    fn default() -> Self {
        Self {
            photonic: true,
            digital: true,
            object_buffer: true,
            kernel_buffer: true,
        }
    }
}

/// Critical-path selection configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriticalPathConfig {
    /// Selection policy.
    #[serde(default)]
    pub policy: CriticalPathPolicy,

    /// Cycle time in seconds used when `policy` is `Override`.
    #[serde(default)]
    pub override_latency: f64,
}
