//! Digital peripheral circuitry characterization.
//!
//! Rolls up DAC rows, ADC rows, the bit-line selector, and the nonlinear and
//! control blocks into a single `(latency, average power, area)` tuple. Row
//! figures are derived from per-converter constants and the configured group
//! sizes (how many metasurface rows/columns share one converter).

use crate::config::{DigitalConfig, PhotonicConfig};

/// Latency of one DAC conversion in seconds.
const DAC_LATENCY: f64 = 1e-9;
/// Average power of one DAC in watts.
const DAC_POWER: f64 = 1e-3;
/// Area of one DAC in nm² (not yet characterized).
const DAC_AREA: f64 = 0.0;

/// Latency of one ADC conversion in seconds.
const ADC_LATENCY: f64 = 1e-9;
/// Average power of one ADC in watts.
const ADC_POWER: f64 = 1e-3;
/// Area of one ADC in nm² (not yet characterized).
const ADC_AREA: f64 = 0.0;

/// Bit-line selector latency in seconds.
const BLS_LATENCY: f64 = 1e-9;
/// Bit-line selector average power in watts.
const BLS_POWER: f64 = 1e-3;
/// Bit-line selector area in nm².
const BLS_AREA: f64 = 20502.0;

/// Normalization/activation/pooling block latency in seconds (not yet characterized).
const NONLINEAR_LATENCY: f64 = 0.0;
/// Normalization/activation/pooling block power in watts (not yet characterized).
const NONLINEAR_POWER: f64 = 0.0;

/// Global control circuitry latency in seconds (not yet characterized).
const CONTROL_LATENCY: f64 = 0.0;
/// Global control circuitry power in watts (not yet characterized).
const CONTROL_POWER: f64 = 0.0;

/// Fixed characterization of the digital peripheral circuitry.
///
/// Immutable after construction; one instance per accelerator.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalSubsystem {
    /// Worst-case latency across the digital paths in seconds.
    pub latency: f64,
    /// Summed average power in watts.
    pub avg_power: f64,
    /// Summed area in nm².
    pub area: f64,
}

impl DigitalSubsystem {
    /// Builds the characterization from configuration.
    ///
    /// A DAC row serializes over the rows it covers, so its latency grows
    /// with the group size while its power and area shrink with it. The
    /// conversion path is one DAC row plus two ADC rows (real and imaginary
    /// read-out of the complex field).
    pub fn new(config: &DigitalConfig, photonic: &PhotonicConfig) -> Self {
        let ms_dim = photonic.ms_dim as f64;

        let dac_row_latency = DAC_LATENCY * ms_dim * config.dac_group_size as f64;
        let dac_row_power = DAC_POWER * (ms_dim / config.dac_group_size as f64);
        let dac_row_area = DAC_AREA * (ms_dim / config.dac_group_size as f64);

        let adc_row_latency = ADC_LATENCY * ms_dim * config.adc_group_size as f64;
        let adc_row_power = ADC_POWER * (ms_dim / config.adc_group_size as f64);
        let adc_row_area = ADC_AREA * (ms_dim / config.adc_group_size as f64);

        let latency = [
            dac_row_latency + 2.0 * adc_row_latency,
            BLS_LATENCY,
            NONLINEAR_LATENCY,
            CONTROL_LATENCY,
        ]
        .into_iter()
        .fold(f64::MIN, f64::max);

        Self {
            latency,
            avg_power: dac_row_power + adc_row_power + BLS_POWER + NONLINEAR_POWER + CONTROL_POWER,
            area: dac_row_area + adc_row_area + BLS_AREA,
        }
    }
}
