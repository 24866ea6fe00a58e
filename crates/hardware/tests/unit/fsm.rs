//! # Pipeline State-Machine Tests
//!
//! End-to-end runs of single layers through the accelerator, checking the
//! access counts, cycle counts, stall behavior, and determinism.

use phsim_core::accel::Stage;
use phsim_core::config::{Config, CriticalPathPolicy};
use pretty_assertions::assert_eq;

use crate::common::{accelerator, reference_layer};

/// Config pinned for hand-checked traces: 16-byte access lines and a 1 µs
/// override cycle so latency figures are exact.
fn scenario_config() -> Config {
    let mut config = Config::default();
    config.memory.access_width = 16;
    config.critical_path.policy = CriticalPathPolicy::Override;
    config.critical_path.override_latency = 1e-6;
    config
}

#[test]
fn test_reference_layer_access_counts() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    let report = acc.run_layer(reference_layer());

    // channels_per_map = min(1e6/1024, 1e6/9, 3) = 3; each object fetch
    // moves 1024*3 = 3072 bytes = exactly 192 16-byte lines. One fetch at
    // LoadObject plus one buffered by the final commit.
    assert_eq!(report.obj_reads, 384);
    assert_eq!(report.obj_read_inefficiency, 1.0);

    // 64 commits, each writing 256 bytes = 16 lines, exactly aligned.
    assert_eq!(report.obj_writes, 64 * 16);
    assert_eq!(report.obj_write_inefficiency, 1.0);

    // 64 kernel fetches (1 convolve + 63 buffered by commits) of
    // 9*3 = 27 bytes = 2 lines each, 32/27 inefficiency.
    assert_eq!(report.kern_reads, 128);
    assert!((report.kern_read_inefficiency - 32.0 / 27.0).abs() < 1e-12);

    // Two transform passes at convolve and per commit.
    assert_eq!(report.fft_convs, 2 + 64 * 2);
}

#[test]
fn test_reference_layer_cycle_count() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    let report = acc.run_layer(reference_layer());

    // 1 load + 1 convolve + 64 commits at 4 cycles each + normalize +
    // activate + pool + store.
    assert_eq!(report.cycles, 2 + 64 * 4 + 4);
    assert!((report.latency - report.cycles as f64 * 1e-6).abs() < 1e-15);
    assert_eq!(report.ops, 2 * 9 * 3 * 64 * 256);
}

#[test]
fn test_multiple_input_channel_groups() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    let mut shape = reference_layer();
    shape.in_channels = 6; // two groups of channels_per_map = 3
    let report = acc.run_layer(shape);

    // Each group runs one convolve plus a 64-commit sweep. Object fetches:
    // the initial load plus one buffered at each group's final commit.
    assert_eq!(report.fft_convs, 2 * (2 + 64 * 2));
    assert_eq!(report.obj_reads, 3 * 192);
    assert_eq!(report.kern_reads, 2 * 128);
    assert_eq!(report.cycles, 2 * (1 + 64 * 4) + 1 + 4);
}

#[test]
fn test_object_load_stalls_until_ready() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    acc.load_layer(reference_layer());
    acc.start();
    assert_eq!(acc.stage(), Stage::LoadObject);

    acc.set_read_ready(false);
    acc.tick();
    acc.tick();
    // Stalled cycles accrue no traffic and hold the stage.
    assert_eq!(acc.stage(), Stage::LoadObject);
    assert_eq!(acc.counters().obj_reads, 0);
    assert_eq!(acc.counters().cycles, 2);

    acc.set_read_ready(true);
    while !acc.done() {
        acc.tick();
    }
    let report = &acc.reports()[0];
    assert_eq!(report.obj_reads, 384);
    assert_eq!(report.cycles, 2 + (2 + 64 * 4 + 4));
}

#[test]
fn test_kernel_stall_takes_wait_state() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    acc.load_layer(reference_layer());
    acc.start();
    acc.tick(); // LoadObject -> ConvolveLoadKernel

    acc.set_read_ready(false);
    acc.tick(); // convolve happens, kernel fetch can't be issued
    assert_eq!(acc.stage(), Stage::WaitKernel);
    assert_eq!(acc.counters().kern_reads, 0);
    assert_eq!(acc.counters().fft_convs, 2);

    acc.tick();
    assert_eq!(acc.stage(), Stage::WaitKernel);

    acc.set_read_ready(true);
    acc.tick(); // stalled fetch completes
    assert_eq!(acc.stage(), Stage::CommitConvolution);
    assert_eq!(acc.counters().kern_reads, 2);

    while !acc.done() {
        acc.tick();
    }
    assert_eq!(acc.reports().len(), 1);
}

#[test]
fn test_determinism_across_fresh_runs() {
    let config = scenario_config();
    let first = accelerator(&config).run_layer(reference_layer()).clone();
    let second = accelerator(&config).run_layer(reference_layer()).clone();
    assert_eq!(first, second);
}

#[test]
fn test_no_counter_leakage_between_layers() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    let first = acc.run_layer(reference_layer()).clone();
    let second = acc.run_layer(reference_layer()).clone();
    assert_eq!(first, second);
    assert_eq!(acc.reports().len(), 2);
}

#[test]
fn test_reports_are_append_only() {
    let config = scenario_config();
    let mut acc = accelerator(&config);
    acc.run_layer(reference_layer());
    let snapshot = acc.reports()[0].clone();
    let mut shape = reference_layer();
    shape.name = "conv2".to_string();
    shape.out_channels = 8;
    acc.run_layer(shape);
    assert_eq!(acc.reports()[0], snapshot);
    assert_eq!(acc.reports()[1].name, "conv2");
}
