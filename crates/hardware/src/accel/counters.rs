//! Per-layer run counters and memory-traffic accounting.
//!
//! Counters are reset on layer start, exclusively owned and mutated by the
//! state machine for the duration of one layer, then snapshotted into the
//! layer report.

/// Result of rounding one transfer request up to whole access lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    /// Number of access-width lines moved: `ceil(bytes / width)`.
    pub accesses: u64,
    /// Buffer-width inefficiency: rounded transfer over ideal transfer,
    /// `>= 1`, equal to 1 iff `width` divides `bytes`.
    pub inefficiency: f64,
}

/// Rounds a `bytes`-sized request up to whole lines of `width` bytes.
pub fn transfer(bytes: u64, width: u64) -> Transfer {
    let accesses = bytes.div_ceil(width);
    Transfer {
        accesses,
        inefficiency: (accesses * width) as f64 / bytes as f64,
    }
}

/// Per-layer access and operation counters.
#[derive(Debug, Clone, Default)]
pub struct RunCounters {
    /// Simulated cycles elapsed in this layer.
    pub cycles: u64,
    /// Object buffer read accesses.
    pub obj_reads: u64,
    /// Object buffer write accesses.
    pub obj_writes: u64,
    /// Kernel buffer read accesses.
    pub kern_reads: u64,
    /// FFT/convolution operations performed.
    pub fft_convs: u64,
    /// Per-request inefficiency ratios for object reads.
    pub obj_read_inefficiency: Vec<f64>,
    /// Per-request inefficiency ratios for object writes.
    pub obj_write_inefficiency: Vec<f64>,
    /// Per-request inefficiency ratios for kernel reads.
    pub kern_read_inefficiency: Vec<f64>,
}

impl RunCounters {
    /// Clears every counter and sequence for a fresh layer run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accounts one object-read request of `bytes` against `width`-byte lines.
    pub fn record_object_read(&mut self, bytes: u64, width: u64) {
        let t = transfer(bytes, width);
        self.obj_reads += t.accesses;
        self.obj_read_inefficiency.push(t.inefficiency);
    }

    /// Accounts one object-write request of `bytes` against `width`-byte lines.
    pub fn record_object_write(&mut self, bytes: u64, width: u64) {
        let t = transfer(bytes, width);
        self.obj_writes += t.accesses;
        self.obj_write_inefficiency.push(t.inefficiency);
    }

    /// Accounts one kernel-read request of `bytes` against `width`-byte lines.
    pub fn record_kernel_read(&mut self, bytes: u64, width: u64) {
        let t = transfer(bytes, width);
        self.kern_reads += t.accesses;
        self.kern_read_inefficiency.push(t.inefficiency);
    }
}

/// Mean of an inefficiency sequence; 1.0 (ideal) when no requests were made.
pub fn mean_inefficiency(seq: &[f64]) -> f64 {
    if seq.is_empty() {
        1.0
    } else {
        seq.iter().sum::<f64>() / seq.len() as f64
    }
}
