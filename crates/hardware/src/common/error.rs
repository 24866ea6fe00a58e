//! Error definitions for the simulator.
//!
//! This module defines the error handling surface of the crate. It provides:
//! 1. **Construction errors:** Failures while building the accelerator (memory
//!    characterization tool failures, malformed characterization output,
//!    unsupported buffer port counts).
//! 2. **Layer-table errors:** Unreadable or unparseable model description files.
//! 3. **Summary errors:** Preconditions of lifetime aggregation.
//!
//! All errors are fatal to the operation that produced them; the only
//! recoverable condition in the system — a non-convolution layer-table row —
//! is skipped with a diagnostic instead of surfacing here.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Fatal errors raised while constructing the accelerator.
///
/// The accelerator cannot exist without a complete characterization of every
/// subsystem, so none of these are retried or recovered from.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The external memory characterization tool could not be spawned.
    #[error("failed to invoke memory characterization tool: {0}")]
    Tool(#[from] io::Error),

    /// The external memory characterization tool ran but exited with a
    /// non-zero status.
    #[error("memory characterization tool exited with {0}")]
    ToolStatus(ExitStatus),

    /// A required labeled field was absent from the characterization output.
    #[error("memory characterization output is missing `{0}`")]
    MissingField(&'static str),

    /// A labeled field was present but its value did not parse as a number.
    #[error("bad value `{value}` for `{field}` in characterization output")]
    BadField {
        /// Label of the offending field.
        field: &'static str,
        /// The raw text that failed to parse.
        value: String,
    },

    /// A memory buffer was configured with a port count other than 1 or 2.
    ///
    /// One port means a shared read/write port (one access per cycle); two
    /// ports mean one read and one write port.
    #[error("unsupported memory port count {0} (must be 1 or 2)")]
    UnsupportedPorts(u32),
}

/// Errors raised while loading a layer-dimension table.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The table file could not be read.
    #[error("failed to read layer table `{path}`: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A convolution row did not have the expected shape.
    #[error("layer table line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending row.
        line: usize,
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Errors raised by lifetime aggregation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// A summary was requested before any layer completed.
    ///
    /// Every derived ratio in the summary divides by total latency or total
    /// energy, so an empty report sequence is a caller error.
    #[error("no completed layers to summarize")]
    NoLayers,
}
