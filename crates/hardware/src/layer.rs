//! Convolutional layer descriptors.
//!
//! A `LayerShape` is the raw per-layer geometry from the layer table; a
//! `LayerDescriptor` adds the fields derived against the metasurface capacity
//! at load time. Object and kernel sizes are flat pixel counts throughout
//! (height × width already multiplied out).

/// Raw per-layer shape parameters.
///
/// Non-positive dimensions are a caller error, not handled defensively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerShape {
    /// Layer name tag from the table.
    pub name: String,
    /// Input object size in pixels.
    pub in_obj_size: u64,
    /// Output object size in pixels.
    pub out_obj_size: u64,
    /// Input channel count.
    pub in_channels: u64,
    /// Output channel (filter) count.
    pub out_channels: u64,
    /// Kernel size in pixels.
    pub kernel_size: u64,
    /// Spatial stride.
    pub stride: u64,
}

/// A loaded layer: raw shape plus derived scheduling fields.
///
/// Read-only during the state-machine run for the layer; replaced wholesale
/// by the next `load_layer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDescriptor {
    /// The raw shape.
    pub shape: LayerShape,
    /// Input channels processed together in one optical pass, bounded by
    /// metasurface capacity: `max(1, min(MS_pix/in_obj_size,
    /// MS_pix/kernel_size, in_channels))`.
    pub channels_per_map: u64,
    /// Output filters accumulated per pass. Always 1: one output filter's
    /// accumulation finishes before the next starts, trading parallelism for
    /// simplicity.
    pub filters_per_map: u64,
    /// Total multiply-accumulate operations for the layer:
    /// `2 × kernel_size × in_channels × out_channels × out_obj_size`.
    pub ops: u64,
}

impl LayerDescriptor {
    /// Derives the scheduling fields for `shape` on a metasurface of
    /// `ms_pix` pixels. Pure function of its inputs.
    pub fn new(shape: LayerShape, ms_pix: u64) -> Self {
        let channels_per_map = (ms_pix / shape.in_obj_size)
            .min(ms_pix / shape.kernel_size)
            .min(shape.in_channels)
            .max(1);
        let ops = 2 * shape.kernel_size * shape.in_channels * shape.out_channels
            * shape.out_obj_size;
        Self {
            shape,
            channels_per_map,
            filters_per_map: 1,
            ops,
        }
    }

    /// Fraction of the metasurface occupied by one pass.
    pub fn utilization(&self, ms_pix: u64) -> f64 {
        (self.shape.in_obj_size * self.channels_per_map) as f64 / ms_pix as f64
    }
}
