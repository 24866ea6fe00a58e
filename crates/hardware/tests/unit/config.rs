//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, and defaults.

use phsim_core::config::*;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_layers);
    assert_eq!(config.photonic.ms_dim, 1000);
    assert_eq!(config.photonic.pixel_bits, 8);
    assert_eq!(config.photonic.ms_pix(), 1_000_000);
    assert_eq!(config.digital.dac_group_size, 1);
    assert_eq!(config.digital.adc_group_size, 1);
}

#[test]
fn test_memory_config_defaults() {
    let memory = MemoryConfig::default();
    assert_eq!(memory.access_width, 1024);
    assert_eq!(memory.banks, 1);
    assert_eq!(memory.kernel_buffer.ports, 1);
    assert_eq!(memory.object_buffer.ports, 2);
    assert!(matches!(
        memory.kernel_buffer.source,
        CharacterizationSource::Fixed { .. }
    ));
}

#[test]
fn test_energy_config_defaults() {
    let energy = EnergyConfig::default();
    assert_eq!(energy.digital_model, CostModelKind::Characterized);
    assert_eq!(energy.memory_model, CostModelKind::Characterized);
    assert!(energy.domains.photonic);
    assert!(energy.domains.digital);
    assert!(energy.domains.object_buffer);
    assert!(energy.domains.kernel_buffer);
}

#[test]
fn test_critical_path_config_defaults() {
    let cp = CriticalPathConfig::default();
    assert_eq!(cp.policy, CriticalPathPolicy::Full);
    assert_eq!(cp.override_latency, 0.0);
}

#[test]
fn test_empty_json_is_all_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.photonic.ms_dim, 1000);
    assert_eq!(config.memory.access_width, 1024);
}

#[test]
fn test_json_round_trip() {
    let json = r#"{
        "general": { "trace_layers": true },
        "photonic": { "ms_dim": 500, "pixel_bits": 6 },
        "digital": { "dac_group_size": 2 },
        "memory": {
            "access_width": 16,
            "banks": 4,
            "kernel_buffer": {
                "ports": 1,
                "source": { "Cacti": { "tool_dir": "../cacti", "config_file": "cache.cfg" } }
            },
            "object_buffer": {
                "ports": 2,
                "source": { "Fixed": {
                    "latency": 1e-9,
                    "read_energy": 1e-10,
                    "write_energy": 2e-10,
                    "static_power": 1e-3,
                    "area": 4.0
                } }
            }
        },
        "energy": {
            "digital_model": "Override",
            "memory_model": "Characterized",
            "domains": { "photonic": false }
        },
        "critical_path": { "policy": "Override", "override_latency": 1e-6 }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert!(config.general.trace_layers);
    assert_eq!(config.photonic.ms_dim, 500);
    assert_eq!(config.photonic.measurement_time, 1e-6);
    assert_eq!(config.digital.dac_group_size, 2);
    assert_eq!(config.digital.adc_group_size, 1);
    assert_eq!(config.memory.access_width, 16);
    assert_eq!(config.memory.banks, 4);
    assert!(matches!(
        config.memory.kernel_buffer.source,
        CharacterizationSource::Cacti { .. }
    ));
    assert_eq!(config.energy.digital_model, CostModelKind::Override);
    assert!(!config.energy.domains.photonic);
    assert!(config.energy.domains.digital);
    assert_eq!(config.critical_path.policy, CriticalPathPolicy::Override);
    assert_eq!(config.critical_path.override_latency, 1e-6);
}

#[test]
fn test_decoupled_alias_for_buffered_policy() {
    let json = r#"{ "critical_path": { "policy": "Decoupled" } }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.critical_path.policy, CriticalPathPolicy::Buffered);
}
