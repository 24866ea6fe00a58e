//! Critical-path selection.
//!
//! The critical-path latency is the fixed wall-clock duration of one
//! simulated cycle. It is computed once per accelerator instance, before any
//! layer runs, and is invariant across layers sharing the same metasurface
//! and memory configuration.

use tracing::info;

use crate::config::{CriticalPathConfig, CriticalPathPolicy, MemoryConfig};
use crate::subsys::{DigitalSubsystem, MemoryBuffer, PhotonicSubsystem};

/// Which subsystem term dominated the selection. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantTerm {
    /// Metasurface measurement time.
    Photonic,
    /// Digital conversion path.
    Digital,
    /// Scaled kernel buffer access time.
    KernelBuffer,
    /// Scaled object buffer access time.
    ObjectBuffer,
}

/// The selected cycle time and its dominating term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalPath {
    /// Cycle time in seconds.
    pub latency: f64,
    /// Dominating term; `None` under the override policy.
    pub dominant: Option<DominantTerm>,
}

/// Selects the critical path under the configured policy.
///
/// In full mode each buffer's access time is scaled by
/// `MS_pix / access_width / banks` — the number of serialized accesses needed
/// to fill the metasurface. In buffered (decoupled) mode memory latency is
/// assumed fully hidden and excluded.
pub fn select(
    config: &CriticalPathConfig,
    memory: &MemoryConfig,
    ms_pix: u64,
    photonic: &PhotonicSubsystem,
    digital: &DigitalSubsystem,
    kernel_buffer: &MemoryBuffer,
    object_buffer: &MemoryBuffer,
) -> CriticalPath {
    let selected = match config.policy {
        CriticalPathPolicy::Override => {
            return CriticalPath {
                latency: config.override_latency,
                dominant: None,
            };
        }
        CriticalPathPolicy::Buffered => dominate(&[
            (photonic.latency, DominantTerm::Photonic),
            (digital.latency, DominantTerm::Digital),
        ]),
        CriticalPathPolicy::Full => {
            let scale = ms_pix as f64 / memory.access_width as f64 / memory.banks as f64;
            dominate(&[
                (photonic.latency, DominantTerm::Photonic),
                (digital.latency, DominantTerm::Digital),
                (kernel_buffer.stats.latency * scale, DominantTerm::KernelBuffer),
                (object_buffer.stats.latency * scale, DominantTerm::ObjectBuffer),
            ])
        }
    };
    info!(
        latency = selected.latency,
        dominant = ?selected.dominant,
        "critical path selected"
    );
    selected
}

/// Returns the largest term and tags it as dominant.
fn dominate(terms: &[(f64, DominantTerm)]) -> CriticalPath {
    let mut best = terms[0];
    for &term in &terms[1..] {
        if term.0 > best.0 {
            best = term;
        }
    }
    CriticalPath {
        latency: best.0,
        dominant: Some(best.1),
    }
}
