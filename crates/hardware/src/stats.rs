//! Lifetime statistics aggregation and reporting.
//!
//! This module turns the ordered layer-report sequence into run-wide totals.
//! It provides:
//! 1. **Totals:** Latency, per-domain energy, operation and access counts.
//! 2. **Derived ratios:** Average power, energy efficiency, utilization,
//!    TOPS, and TOPS/W.
//! 3. **Export:** One row per tracked metric across all layers, consumed by
//!    an external writer.

use crate::accel::LayerReport;
use crate::common::SummaryError;

/// Aggregate sums and derived ratios over all completed layers.
///
/// Computed on demand from the report slice, not persisted incrementally.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeSummary {
    /// Number of completed layers.
    pub layers: usize,
    /// Total simulated cycles.
    pub total_cycles: u64,
    /// Total wall-clock latency in seconds.
    pub total_latency: f64,
    /// Total multiply-accumulate operations.
    pub total_ops: u64,
    /// Photonic energy in joules.
    pub photonic_energy: f64,
    /// Digital energy in joules (characterized model).
    pub digital_energy: f64,
    /// DAC energy in joules (override model).
    pub dac_energy: f64,
    /// ADC energy in joules (override model).
    pub adc_energy: f64,
    /// Object buffer energy in joules.
    pub object_energy: f64,
    /// Kernel buffer energy in joules.
    pub kernel_energy: f64,
    /// Total energy in joules.
    pub total_energy: f64,
    /// Average power in watts (`total_energy / total_latency`).
    pub avg_power: f64,
    /// Energy efficiency in images per joule (single image per run).
    pub images_per_joule: f64,
    /// FFT-op-weighted average metasurface occupancy, in [0, 1].
    pub utilization: f64,
    /// Aggregate throughput in tera-ops per second.
    pub tops: f64,
    /// Throughput per watt in TOPS/W.
    pub tops_per_watt: f64,
    /// Total modeled area (digital + buffer data arrays).
    pub area: f64,
}

impl LifetimeSummary {
    /// Aggregates the report sequence.
    ///
    /// # Errors
    ///
    /// Fails with [`SummaryError::NoLayers`] when `reports` is empty: every
    /// derived ratio below divides by a total that would be zero.
    pub fn from_reports(reports: &[LayerReport], area: f64) -> Result<Self, SummaryError> {
        if reports.is_empty() {
            return Err(SummaryError::NoLayers);
        }

        let total_cycles = reports.iter().map(|r| r.cycles).sum();
        let total_latency: f64 = reports.iter().map(|r| r.latency).sum();
        let total_ops: u64 = reports.iter().map(|r| r.ops).sum();
        let photonic_energy: f64 = reports.iter().map(|r| r.photonic_energy).sum();
        let digital_energy: f64 = reports.iter().map(|r| r.digital_energy).sum();
        let dac_energy: f64 = reports.iter().map(|r| r.dac_energy).sum();
        let adc_energy: f64 = reports.iter().map(|r| r.adc_energy).sum();
        let object_energy: f64 = reports.iter().map(|r| r.object_energy).sum();
        let kernel_energy: f64 = reports.iter().map(|r| r.kernel_energy).sum();
        let total_energy: f64 = reports.iter().map(|r| r.total_energy).sum();

        let total_ffts: u64 = reports.iter().map(|r| r.fft_convs).sum();
        let utilization = if total_ffts == 0 {
            0.0
        } else {
            reports
                .iter()
                .map(|r| r.utilization * r.fft_convs as f64)
                .sum::<f64>()
                / total_ffts as f64
        };

        let tops = total_ops as f64 * 1e-12 / total_latency;

        // Total energy is zero when every domain is disabled; report zero
        // efficiency rather than inf.
        let (images_per_joule, tops_per_watt) = if total_energy > 0.0 {
            (1.0 / total_energy, total_ops as f64 * 1e-12 / total_energy)
        } else {
            (0.0, 0.0)
        };

        Ok(Self {
            layers: reports.len(),
            total_cycles,
            total_latency,
            total_ops,
            photonic_energy,
            digital_energy,
            dac_energy,
            adc_energy,
            object_energy,
            kernel_energy,
            total_energy,
            avg_power: total_energy / total_latency,
            images_per_joule,
            utilization,
            tops,
            tops_per_watt,
            area,
        })
    }

    /// Per-domain energy with its share of the total, for breakdown output.
    pub fn domain_breakdown(&self) -> [(&'static str, f64, f64); 6] {
        let pct = |e: f64| {
            if self.total_energy > 0.0 {
                100.0 * e / self.total_energy
            } else {
                0.0
            }
        };
        [
            ("photonic", self.photonic_energy, pct(self.photonic_energy)),
            ("digital", self.digital_energy, pct(self.digital_energy)),
            ("dac", self.dac_energy, pct(self.dac_energy)),
            ("adc", self.adc_energy, pct(self.adc_energy)),
            ("object_buffer", self.object_energy, pct(self.object_energy)),
            ("kernel_buffer", self.kernel_energy, pct(self.kernel_energy)),
        ]
    }

    /// Prints the summary to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PHOTONIC ACCELERATOR SIMULATION SUMMARY");
        println!("==========================================================");
        println!("layers                   {}", self.layers);
        println!("sim_cycles               {}", self.total_cycles);
        println!("total_latency            {:.4e} s", self.total_latency);
        println!("total_ops                {}", self.total_ops);
        println!("total_energy             {:.4e} J", self.total_energy);
        println!("avg_power                {:.4e} W", self.avg_power);
        println!("images_per_joule         {:.4e}", self.images_per_joule);
        println!("utilization              {:.2}%", self.utilization * 100.0);
        println!("throughput               {:.4} TOPS", self.tops);
        println!("tops_per_watt            {:.4}", self.tops_per_watt);
        println!("area                     {:.4} mm2", self.area);
        println!("----------------------------------------------------------");
        println!("ENERGY BREAKDOWN");
        for (name, energy, pct) in self.domain_breakdown() {
            println!("  energy.{:<16} {:.4e} J ({:.2}%)", name, energy, pct);
        }
        println!("==========================================================");
    }
}

/// Metrics tracked in the export table, one row each, paired with the
/// accessor that reads the metric out of a report.
pub const EXPORT_METRICS: &[(&str, fn(&LayerReport) -> f64)] = &[
    ("cycles", |r| r.cycles as f64),
    ("latency", |r| r.latency),
    ("photonic_energy", |r| r.photonic_energy),
    ("digital_energy", |r| r.digital_energy),
    ("dac_energy", |r| r.dac_energy),
    ("adc_energy", |r| r.adc_energy),
    ("object_energy", |r| r.object_energy),
    ("kernel_energy", |r| r.kernel_energy),
    ("total_energy", |r| r.total_energy),
    ("ops", |r| r.ops as f64),
    ("utilization", |r| r.utilization),
    ("obj_reads", |r| r.obj_reads as f64),
    ("obj_writes", |r| r.obj_writes as f64),
    ("kern_reads", |r| r.kern_reads as f64),
    ("fft_convs", |r| r.fft_convs as f64),
    ("obj_read_inefficiency", |r| r.obj_read_inefficiency),
    ("obj_write_inefficiency", |r| r.obj_write_inefficiency),
    ("kern_read_inefficiency", |r| r.kern_read_inefficiency),
];

/// Builds the export table: one `(metric, values-per-layer)` row per tracked
/// metric, ordered as [`EXPORT_METRICS`]. The writer supplies the header row
/// of layer indices and the concrete format.
pub fn metric_rows(reports: &[LayerReport]) -> Vec<(&'static str, Vec<f64>)> {
    EXPORT_METRICS
        .iter()
        .map(|&(metric, read)| (metric, reports.iter().map(read).collect()))
        .collect()
}
