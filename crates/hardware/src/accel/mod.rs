//! The accelerator: subsystems, pipeline state machine, and reports.
//!
//! `Accelerator` owns the fixed subsystem characterizations, the live
//! pipeline stage and run counters, and the append-only layer report
//! sequence. It drives one convolutional layer at a time through
//! load/convolve/store phases, one state transition and one side-effect
//! application per simulated cycle.

use tracing::{debug, info};

use crate::common::{BuildError, SummaryError};
use crate::config::Config;
use crate::layer::{LayerDescriptor, LayerShape};
use crate::stats::LifetimeSummary;
use crate::subsys::{DigitalSubsystem, MemoryBuffer, PhotonicSubsystem};

/// Per-layer energy/latency accounting.
pub mod accountant;
/// Run counters and memory-traffic accounting.
pub mod counters;
/// Critical-path selection.
pub mod critical_path;
/// Pipeline stages and the pure transition function.
pub mod state;

pub use accountant::{Accountant, LayerReport};
pub use counters::RunCounters;
pub use critical_path::{CriticalPath, DominantTerm};
pub use state::{next_stage, Predicates, Stage};

/// Extra cycles consumed by `CommitConvolution` beyond the nominal one:
/// committing a frequency-domain convolution costs a forward and inverse
/// transform pair, modeled as 4 cycles of critical-path latency total.
const COMMIT_EXTRA_CYCLES: u64 = 3;

/// The photonic CNN accelerator performance model.
///
/// Constructed once from configuration (running the external memory
/// characterization tool if configured); simulates layers strictly
/// sequentially. At most one layer is in flight at a time.
#[derive(Debug)]
pub struct Accelerator {
    /// Photonic subsystem characterization.
    pub photonic: PhotonicSubsystem,
    /// Digital subsystem characterization.
    pub digital: DigitalSubsystem,
    /// Kernel buffer characterization.
    pub kernel_buffer: MemoryBuffer,
    /// Object buffer characterization.
    pub object_buffer: MemoryBuffer,
    /// The fixed per-cycle duration and its dominating term.
    pub critical_path: CriticalPath,

    accountant: Accountant,
    access_width: u64,
    trace_layers: bool,

    layer: Option<LayerDescriptor>,
    stage: Stage,
    read_ready: bool,
    done: bool,
    curr_in_channel: u64,
    curr_out_channel: u64,
    counters: RunCounters,
    reports: Vec<LayerReport>,
}

impl Accelerator {
    /// Builds the accelerator from configuration.
    ///
    /// Characterizes both memory buffers (invoking the external tool when the
    /// configuration asks for it) and selects the critical path. Fatal on any
    /// incomplete characterization or unsupported port count.
    pub fn new(config: &Config) -> Result<Self, BuildError> {
        let kernel_buffer = MemoryBuffer::from_config(&config.memory.kernel_buffer)?;
        let object_buffer = MemoryBuffer::from_config(&config.memory.object_buffer)?;
        Ok(Self::with_buffers(config, kernel_buffer, object_buffer))
    }

    /// Builds the accelerator around already-characterized buffers.
    ///
    /// This is the seam that lets tests supply canned characterizations
    /// without the external tool.
    pub fn with_buffers(
        config: &Config,
        kernel_buffer: MemoryBuffer,
        object_buffer: MemoryBuffer,
    ) -> Self {
        let photonic = PhotonicSubsystem::new(&config.photonic);
        let digital = DigitalSubsystem::new(&config.digital, &config.photonic);
        let critical_path = critical_path::select(
            &config.critical_path,
            &config.memory,
            photonic.ms_pix,
            &photonic,
            &digital,
            &kernel_buffer,
            &object_buffer,
        );
        Self {
            photonic,
            digital,
            kernel_buffer,
            object_buffer,
            critical_path,
            accountant: Accountant::new(&config.energy, config.memory.access_width),
            access_width: config.memory.access_width,
            trace_layers: config.general.trace_layers,
            layer: None,
            stage: Stage::Wait,
            read_ready: true,
            done: true,
            curr_in_channel: 0,
            curr_out_channel: 0,
            counters: RunCounters::default(),
            reports: Vec::new(),
        }
    }

    /// Loads a layer, replacing the previous descriptor.
    ///
    /// Computes the derived scheduling fields against the metasurface
    /// capacity. No side effects beyond the replacement.
    pub fn load_layer(&mut self, shape: LayerShape) {
        self.layer = Some(LayerDescriptor::new(shape, self.photonic.ms_pix));
    }

    /// The currently loaded layer, if any.
    pub fn layer(&self) -> Option<&LayerDescriptor> {
        self.layer.as_ref()
    }

    /// Current pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the last started layer has finished.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Live run counters (exclusively owned by the state machine).
    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Sets the memory read handshake for subsequent cycles.
    ///
    /// Constant-true today; an external driver can clear it per cycle to
    /// model contention, producing stall loops in the state machine.
    pub fn set_read_ready(&mut self, ready: bool) {
        self.read_ready = ready;
    }

    /// Asserts the start signal: resets all run counters and channel cursors
    /// and moves `Wait → LoadObject`.
    ///
    /// # Panics
    ///
    /// Panics if no layer has been loaded.
    pub fn start(&mut self) {
        assert!(self.layer.is_some(), "start() without a loaded layer");
        self.counters.reset();
        self.curr_in_channel = 0;
        self.curr_out_channel = 0;
        self.done = false;
        self.stage = next_stage(
            self.stage,
            Predicates {
                start: true,
                read_ready: self.read_ready,
                out_done: false,
                in_done: false,
            },
        );
    }

    /// Advances the simulation by one cycle: applies the current stage's side
    /// effects, then transitions.
    pub fn tick(&mut self) {
        self.latch();
        let layer = match &self.layer {
            Some(layer) => layer,
            None => return,
        };
        self.stage = next_stage(
            self.stage,
            Predicates {
                start: false,
                read_ready: self.read_ready,
                out_done: self.curr_out_channel >= layer.shape.out_channels,
                in_done: self.curr_in_channel >= layer.shape.in_channels,
            },
        );
    }

    /// Runs one layer to completion and returns its finalized report.
    ///
    /// Equivalent to `load_layer` + `start` + ticking until done. Always
    /// terminates: the channel cursors are monotonically non-decreasing and
    /// bounded, and `read_ready` is eventually true.
    pub fn run_layer(&mut self, shape: LayerShape) -> &LayerReport {
        self.load_layer(shape);
        self.start();
        while !self.done {
            self.tick();
        }
        // start() ran at least one Store latch, so a report exists.
        &self.reports[self.reports.len() - 1]
    }

    /// All finalized layer reports, in completion order.
    pub fn reports(&self) -> &[LayerReport] {
        &self.reports
    }

    /// Aggregates all layer reports into run-wide totals.
    ///
    /// # Errors
    ///
    /// Fails with [`SummaryError::NoLayers`] if no layer has completed.
    pub fn summary(&self) -> Result<LifetimeSummary, SummaryError> {
        LifetimeSummary::from_reports(&self.reports, self.total_area())
    }

    /// Total modeled area in mm²: digital circuitry (characterized in nm²)
    /// plus both buffer data arrays. The metasurface itself carries no area
    /// model yet.
    pub fn total_area(&self) -> f64 {
        self.digital.area * 1e-12 + self.kernel_buffer.stats.area + self.object_buffer.stats.area
    }

    /// Applies the current stage's per-cycle side effects.
    fn latch(&mut self) {
        self.counters.cycles += 1;
        let Some(layer) = &self.layer else { return };
        let width = self.access_width;

        match self.stage {
            Stage::Wait => {
                self.done = true;
            }
            Stage::LoadObject => {
                if self.read_ready {
                    self.counters
                        .record_object_read(layer.shape.in_obj_size * layer.channels_per_map, width);
                }
            }
            Stage::ConvolveLoadKernel => {
                // Two transform passes per convolve: the intermediate
                // representation is complex-valued.
                self.counters.fft_convs += 2;
                self.curr_in_channel += layer.channels_per_map;
                self.curr_out_channel = 0;
                if self.read_ready {
                    self.counters.record_kernel_read(
                        layer.shape.kernel_size * layer.channels_per_map * layer.filters_per_map,
                        width,
                    );
                }
            }
            Stage::WaitKernel => {
                if self.read_ready {
                    self.counters.record_kernel_read(
                        layer.shape.kernel_size * layer.channels_per_map * layer.filters_per_map,
                        width,
                    );
                }
            }
            Stage::CommitConvolution => {
                self.counters.cycles += COMMIT_EXTRA_CYCLES;
                self.counters.fft_convs += 2;
                self.counters
                    .record_object_write(layer.shape.out_obj_size, width);
                self.curr_out_channel += layer.filters_per_map;
                if self.read_ready && self.curr_out_channel < layer.shape.out_channels {
                    // More filters to apply to this input group: buffer the
                    // next kernel fetch now.
                    self.counters.record_kernel_read(
                        layer.shape.kernel_size * layer.channels_per_map * layer.filters_per_map,
                        width,
                    );
                }
                if self.read_ready && self.curr_out_channel >= layer.shape.out_channels {
                    // Input group fully processed: buffer the next object
                    // fetch now.
                    self.counters
                        .record_object_read(layer.shape.in_obj_size * layer.channels_per_map, width);
                }
            }
            Stage::Normalize | Stage::Activate | Stage::Pool => {}
            Stage::Store => {
                let report = self.accountant.finalize(
                    layer,
                    &self.counters,
                    &self.photonic,
                    &self.digital,
                    &self.kernel_buffer,
                    &self.object_buffer,
                    self.critical_path.latency,
                );
                if self.trace_layers {
                    info!(
                        layer = %report.name,
                        cycles = report.cycles,
                        latency = report.latency,
                        energy = report.total_energy,
                        "layer complete"
                    );
                } else {
                    debug!(layer = %report.name, cycles = report.cycles, "layer complete");
                }
                self.reports.push(report);
            }
        }
    }
}
