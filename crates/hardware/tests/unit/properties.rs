//! # Property Tests
//!
//! Algebraic properties of the derived scheduling fields and the
//! transfer-rounding arithmetic, over randomized inputs.

use phsim_core::accel::counters::{mean_inefficiency, transfer};
use phsim_core::layer::{LayerDescriptor, LayerShape};
use proptest::prelude::*;

fn arb_shape() -> impl Strategy<Value = LayerShape> {
    (
        1u64..=65_536,
        1u64..=65_536,
        1u64..=512,
        1u64..=512,
        1u64..=121,
        1u64..=4,
    )
        .prop_map(
            |(in_obj, out_obj, in_ch, out_ch, kernel, stride)| LayerShape {
                name: "conv".to_string(),
                in_obj_size: in_obj,
                out_obj_size: out_obj,
                in_channels: in_ch,
                out_channels: out_ch,
                kernel_size: kernel,
                stride,
            },
        )
}

proptest! {
    #[test]
    fn prop_channels_per_map_bounds(shape in arb_shape(), ms_dim in 10u64..=2000) {
        let ms_pix = ms_dim * ms_dim;
        let layer = LayerDescriptor::new(shape.clone(), ms_pix);
        let cpm = layer.channels_per_map;

        prop_assert!(cpm >= 1);
        prop_assert!(cpm <= shape.in_channels.max(1));
        // Above the floor, the mapped group must fit the metasurface for
        // both the objects and the kernels.
        if cpm > 1 {
            prop_assert!(cpm * shape.in_obj_size <= ms_pix);
            prop_assert!(cpm * shape.kernel_size <= ms_pix);
        }
    }

    #[test]
    fn prop_ops_formula(shape in arb_shape()) {
        let layer = LayerDescriptor::new(shape.clone(), 1_000_000);
        let expected = 2 * shape.kernel_size * shape.in_channels
            * shape.out_channels * shape.out_obj_size;
        prop_assert_eq!(layer.ops, expected);
    }

    #[test]
    fn prop_utilization_is_a_fraction(shape in arb_shape(), ms_dim in 10u64..=2000) {
        let ms_pix = ms_dim * ms_dim;
        let layer = LayerDescriptor::new(shape, ms_pix);
        let util = layer.utilization(ms_pix);
        prop_assert!(util > 0.0);
        // A single oversized channel can exceed capacity; any multi-channel
        // mapping cannot.
        if layer.channels_per_map > 1 {
            prop_assert!(util <= 1.0);
        }
    }

    #[test]
    fn prop_transfer_covers_request(bytes in 1u64..=1_000_000_000, width in 1u64..=65_536) {
        let t = transfer(bytes, width);
        prop_assert!(t.accesses * width >= bytes);
        prop_assert!((t.accesses - 1) * width < bytes);
    }

    #[test]
    fn prop_inefficiency_is_one_iff_aligned(bytes in 1u64..=1_000_000_000, width in 1u64..=65_536) {
        let t = transfer(bytes, width);
        prop_assert!(t.inefficiency >= 1.0);
        if bytes % width == 0 {
            prop_assert!((t.inefficiency - 1.0).abs() < 1e-12);
        } else {
            prop_assert!(t.inefficiency > 1.0);
        }
    }

    #[test]
    fn prop_mean_inefficiency_within_range(seq in proptest::collection::vec(1.0f64..=4.0, 1..64)) {
        let mean = mean_inefficiency(&seq);
        let min = seq.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = seq.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(mean >= min - 1e-12);
        prop_assert!(mean <= max + 1e-12);
    }
}
