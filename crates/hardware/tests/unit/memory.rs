//! # Memory Characterization Tests
//!
//! Checks parsing of the external tool's labeled output, unit conversion,
//! port validation, and building buffers from configuration.

use phsim_core::common::BuildError;
use phsim_core::config::{BufferConfig, CharacterizationSource};
use phsim_core::subsys::{parse_tool_output, Canned, MemoryBuffer};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{canned_buffer, canned_stats};

/// A trimmed sample of the tool's report, labels and colon layout intact.
const SAMPLE_OUTPUT: &str = "\
Cache height x width (mm): 0.5 x 1.2

    Access time (ns): 1.234
    Cycle time (ns): 0.8
    Total dynamic read energy per access (nJ): 0.045
    Total dynamic write energy per access (nJ): 0.061
    Total leakage power of a bank (mW): 12.5

  Data array: Area (mm2): 0.391
";

#[test]
fn test_parse_tool_output_converts_units() {
    let stats = parse_tool_output(SAMPLE_OUTPUT).unwrap();
    assert!((stats.latency - 1.234e-9).abs() < 1e-18);
    assert!((stats.read_energy - 0.045e-9).abs() < 1e-18);
    assert!((stats.write_energy - 0.061e-9).abs() < 1e-18);
    assert!((stats.static_power - 12.5e-3).abs() < 1e-12);
    assert!((stats.area - 0.391).abs() < 1e-12);
}

#[test]
fn test_parse_tool_output_missing_field() {
    let truncated = SAMPLE_OUTPUT
        .lines()
        .filter(|l| !l.contains("leakage"))
        .collect::<Vec<_>>()
        .join("\n");
    let err = parse_tool_output(&truncated).unwrap_err();
    assert!(matches!(err, BuildError::MissingField(f) if f.contains("leakage")));
}

#[test]
fn test_parse_tool_output_bad_value() {
    let mangled = SAMPLE_OUTPUT.replace("1.234", "n/a");
    let err = parse_tool_output(&mangled).unwrap_err();
    match err {
        BuildError::BadField { value, .. } => assert_eq!(value, "n/a"),
        other => panic!("expected BadField, got {other:?}"),
    }
}

#[test]
fn test_parse_empty_output_reports_first_missing_field() {
    let err = parse_tool_output("").unwrap_err();
    assert!(matches!(err, BuildError::MissingField(_)));
}

#[rstest]
#[case(1)]
#[case(2)]
fn test_supported_port_counts(#[case] ports: u32) {
    let buffer = MemoryBuffer::build(ports, &Canned(canned_stats())).unwrap();
    assert_eq!(buffer.ports, ports);
}

#[rstest]
#[case(0)]
#[case(3)]
#[case(4)]
fn test_unsupported_port_counts(#[case] ports: u32) {
    let err = MemoryBuffer::build(ports, &Canned(canned_stats())).unwrap_err();
    assert!(matches!(err, BuildError::UnsupportedPorts(p) if p == ports));
}

#[test]
fn test_build_from_fixed_source() {
    let config = BufferConfig {
        ports: 2,
        source: CharacterizationSource::Fixed {
            latency: 3e-9,
            read_energy: 2e-10,
            write_energy: 4e-10,
            static_power: 5e-3,
            area: 1.5,
        },
    };
    let buffer = MemoryBuffer::from_config(&config).unwrap();
    assert_eq!(buffer.ports, 2);
    assert!((buffer.stats.latency - 3e-9).abs() < 1e-18);
    assert!((buffer.stats.area - 1.5).abs() < 1e-12);
}

#[test]
fn test_canned_buffer_carries_stats_through() {
    let buffer = canned_buffer(1);
    assert_eq!(buffer.stats, canned_stats());
}
