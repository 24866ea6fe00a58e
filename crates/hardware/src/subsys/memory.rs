//! Memory buffer characterization.
//!
//! This module provides the capability interface for obtaining a buffer's
//! fixed cost tuple. It performs:
//! 1. **Tool invocation:** `CactiTool` shells out to the external CACTI
//!    binary against a technology config file, one-shot and synchronous.
//! 2. **Output parsing:** A fixed set of labeled numeric fields is extracted
//!    from the tool's textual output; a missing field is fatal.
//! 3. **Test doubles:** `Canned` returns fixed values so the accounting logic
//!    can be exercised without the external dependency.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::common::BuildError;
use crate::config::{BufferConfig, CharacterizationSource};

/// Fixed characterization of one memory buffer.
///
/// All values are in SI units (seconds, joules, watts) except `area` (mm²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemCharacterization {
    /// Access time in seconds.
    pub latency: f64,
    /// Dynamic read energy per access in joules.
    pub read_energy: f64,
    /// Dynamic write energy per access in joules.
    pub write_energy: f64,
    /// Leakage power in watts.
    pub static_power: f64,
    /// Data-array area in mm².
    pub area: f64,
}

/// Capability interface for memory characterization.
///
/// The default implementation shells out to the external tool; `Canned`
/// returns fixed values for tests and for configurations that supply explicit
/// numbers.
pub trait Characterize {
    /// Produces the buffer's characterization, or a fatal construction error.
    fn characterize(&self) -> Result<MemCharacterization, BuildError>;
}

/// Characterizer that invokes the external CACTI binary.
#[derive(Debug, Clone)]
pub struct CactiTool {
    /// Directory containing the `cacti` executable.
    pub tool_dir: PathBuf,
    /// Technology/config file handed to `cacti -infile`.
    pub config_file: PathBuf,
}

impl Characterize for CactiTool {
    /// Runs `./cacti -infile <config>` in the tool directory and parses its
    /// stdout. Spawn failures, non-zero exits, and missing output fields are
    /// all fatal.
    fn characterize(&self) -> Result<MemCharacterization, BuildError> {
        debug!(config = %self.config_file.display(), "running memory characterization tool");
        let output = Command::new("./cacti")
            .arg("-infile")
            .arg(&self.config_file)
            .current_dir(&self.tool_dir)
            .output()?;
        if !output.status.success() {
            return Err(BuildError::ToolStatus(output.status));
        }
        parse_tool_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Characterizer that returns fixed values.
#[derive(Debug, Clone, Copy)]
pub struct Canned(pub MemCharacterization);

impl Characterize for Canned {
    fn characterize(&self) -> Result<MemCharacterization, BuildError> {
        Ok(self.0)
    }
}

/// Labeled fields expected in the tool output, with their unit scale to SI.
const ACCESS_TIME: &str = "Access time (ns):";
const READ_ENERGY: &str = "Total dynamic read energy per access (nJ):";
const WRITE_ENERGY: &str = "Total dynamic write energy per access (nJ):";
const LEAKAGE_POWER: &str = "Total leakage power of a bank (mW):";
const DATA_ARRAY_AREA: &str = "Data array: Area (mm2):";

/// Parses the characterization tool's textual output.
///
/// Scans for the labeled numeric fields and converts them to SI units
/// (ns → s, nJ → J, mW → W). The area line carries two colons, so its value
/// is the third colon-separated field.
pub fn parse_tool_output(text: &str) -> Result<MemCharacterization, BuildError> {
    let mut latency = None;
    let mut read_energy = None;
    let mut write_energy = None;
    let mut static_power = None;
    let mut area = None;

    for line in text.lines() {
        if line.contains(ACCESS_TIME) {
            latency = Some(field_value(line, 1, ACCESS_TIME)? * 1e-9);
        } else if line.contains(READ_ENERGY) {
            read_energy = Some(field_value(line, 1, READ_ENERGY)? * 1e-9);
        } else if line.contains(WRITE_ENERGY) {
            write_energy = Some(field_value(line, 1, WRITE_ENERGY)? * 1e-9);
        } else if line.contains(LEAKAGE_POWER) {
            static_power = Some(field_value(line, 1, LEAKAGE_POWER)? * 1e-3);
        } else if line.contains(DATA_ARRAY_AREA) {
            area = Some(field_value(line, 2, DATA_ARRAY_AREA)?);
        }
    }

    Ok(MemCharacterization {
        latency: latency.ok_or(BuildError::MissingField(ACCESS_TIME))?,
        read_energy: read_energy.ok_or(BuildError::MissingField(READ_ENERGY))?,
        write_energy: write_energy.ok_or(BuildError::MissingField(WRITE_ENERGY))?,
        static_power: static_power.ok_or(BuildError::MissingField(LEAKAGE_POWER))?,
        area: area.ok_or(BuildError::MissingField(DATA_ARRAY_AREA))?,
    })
}

/// Extracts the `index`-th colon-separated field of `line` as a float.
fn field_value(line: &str, index: usize, field: &'static str) -> Result<f64, BuildError> {
    let raw = line.split(':').nth(index).unwrap_or("").trim();
    raw.parse().map_err(|_| BuildError::BadField {
        field,
        value: raw.to_string(),
    })
}

/// One memory buffer: a validated port count plus its characterization.
///
/// One port means a shared read/write port (one access per cycle); two ports
/// mean one dedicated read and one dedicated write port.
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    /// Port count (1 or 2).
    pub ports: u32,
    /// The buffer's fixed cost tuple.
    pub stats: MemCharacterization,
}

impl MemoryBuffer {
    /// Builds a buffer from a validated port count and a characterizer.
    pub fn build(ports: u32, characterizer: &dyn Characterize) -> Result<Self, BuildError> {
        if ports != 1 && ports != 2 {
            return Err(BuildError::UnsupportedPorts(ports));
        }
        Ok(Self {
            ports,
            stats: characterizer.characterize()?,
        })
    }

    /// Builds a buffer from its configuration block.
    pub fn from_config(config: &BufferConfig) -> Result<Self, BuildError> {
        match &config.source {
            CharacterizationSource::Cacti {
                tool_dir,
                config_file,
            } => Self::build(
                config.ports,
                &CactiTool {
                    tool_dir: tool_dir.into(),
                    config_file: config_file.into(),
                },
            ),
            CharacterizationSource::Fixed {
                latency,
                read_energy,
                write_energy,
                static_power,
                area,
            } => Self::build(
                config.ports,
                &Canned(MemCharacterization {
                    latency: *latency,
                    read_energy: *read_energy,
                    write_energy: *write_energy,
                    static_power: *static_power,
                    area: *area,
                }),
            ),
        }
    }
}
