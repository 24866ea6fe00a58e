//! Pipeline stages and the pure transition function.
//!
//! The transition logic is separated from per-stage side effects so it can be
//! unit-tested independently of counter accounting. Exactly one `Stage` value
//! is live per accelerator; only `next_stage` produces new values.

/// Pipeline stage of the layer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Idle; waiting for a start signal.
    Wait,
    /// Fetch the input tile from the object buffer.
    LoadObject,
    /// Transform the input tile; begin the kernel fetch.
    ConvolveLoadKernel,
    /// Stall for a long kernel fetch.
    WaitKernel,
    /// Apply the frequency-domain convolution; advance the output-channel cursor.
    CommitConvolution,
    /// Normalization.
    Normalize,
    /// Activation.
    Activate,
    /// Pooling.
    Pool,
    /// Store results; finalize the layer.
    Store,
}

/// Inputs to the transition function, sampled after the current cycle's
/// side effects have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicates {
    /// External start signal (observed only in `Wait`).
    pub start: bool,
    /// Memory read handshake. No backpressure source is wired in today, so
    /// this is constant-true, but stalls are fully supported.
    pub read_ready: bool,
    /// `curr_out_channel >= out_channels`.
    pub out_done: bool,
    /// `curr_in_channel >= in_channels`.
    pub in_done: bool,
}

/// Computes the next stage. Pure function; no side effects.
pub fn next_stage(stage: Stage, p: Predicates) -> Stage {
    match stage {
        Stage::Wait => {
            if p.start {
                Stage::LoadObject
            } else {
                Stage::Wait
            }
        }
        Stage::LoadObject => {
            if p.read_ready {
                Stage::ConvolveLoadKernel
            } else {
                Stage::LoadObject
            }
        }
        Stage::ConvolveLoadKernel | Stage::WaitKernel => {
            if p.read_ready {
                Stage::CommitConvolution
            } else {
                Stage::WaitKernel
            }
        }
        Stage::CommitConvolution => {
            if p.out_done {
                if p.in_done {
                    Stage::Normalize
                } else if p.read_ready {
                    Stage::ConvolveLoadKernel
                } else {
                    Stage::WaitKernel
                }
            } else if p.read_ready {
                Stage::CommitConvolution
            } else {
                Stage::WaitKernel
            }
        }
        Stage::Normalize => Stage::Activate,
        Stage::Activate => Stage::Pool,
        Stage::Pool => Stage::Store,
        Stage::Store => Stage::Wait,
    }
}
