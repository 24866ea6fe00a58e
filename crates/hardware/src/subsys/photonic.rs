//! Photonic subsystem characterization.
//!
//! Derives the energy and latency of one metasurface measurement from
//! physical constants and the configured pixel count and precision. The
//! photon budget comes from shot noise: achieving `Nb` bits of precision with
//! SNR `sqrt(n_p)` requires `n_p = (2/3) * 2^(2*Nb)` photons per pixel.

use std::f64::consts::PI;

use crate::config::PhotonicConfig;

/// Wavelength of the illumination source in meters (905 nm).
const WAVELENGTH: f64 = 905e-9;

/// Reduced Planck constant in J·s.
const HBAR: f64 = 1.05e-34;

/// Speed of light in m/s.
const SPEED_OF_LIGHT: f64 = 2.998e8;

/// Fixed characterization of the optical compute array.
///
/// Immutable after construction; one instance per accelerator.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotonicSubsystem {
    /// Total metasurface pixel count.
    pub ms_pix: u64,
    /// Per-pixel precision in bits.
    pub pixel_bits: u32,
    /// Optical energy of one full-array measurement in joules.
    pub measurement_energy: f64,
    /// Time for one measurement in seconds (LC switching speed).
    pub latency: f64,
    /// Optical power during a measurement in watts.
    pub optical_power: f64,
}

impl PhotonicSubsystem {
    /// Builds the characterization from configuration.
    pub fn new(config: &PhotonicConfig) -> Self {
        let ms_pix = config.ms_pix();
        let omega = 2.0 * PI * SPEED_OF_LIGHT / WAVELENGTH;
        let photons_per_pixel = (2.0 / 3.0) * 2f64.powi(2 * config.pixel_bits as i32);
        let measurement_energy = HBAR * omega * photons_per_pixel * ms_pix as f64;
        let latency = config.measurement_time;
        Self {
            ms_pix,
            pixel_bits: config.pixel_bits,
            measurement_energy,
            latency,
            optical_power: measurement_energy / latency,
        }
    }
}
