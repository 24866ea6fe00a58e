//! Layer-table loading.
//!
//! This module reads the network description consumed by the simulator. It
//! performs:
//! 1. **Parsing:** One row per layer — `name in_h in_w k_h k_w in_ch out_ch
//!    stride`, whitespace-separated; `#` comments and blank lines ignored.
//! 2. **Filtering:** Rows whose name is not convolution-family are skipped
//!    with a diagnostic, not an error.
//! 3. **Derivation:** Flat pixel counts for the object and kernel sizes, with
//!    the output size derived per spatial axis assuming symmetric padding:
//!    `out_dim = (in_dim - 2 * (k_dim / 2)) / stride`.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::common::ModelError;
use crate::layer::LayerShape;

/// Name tag marking a row as a convolution-family layer.
const CONV_TAG: &str = "conv";

/// Loads an ordered layer table from `path`.
///
/// # Errors
///
/// Fails if the file cannot be read or if a convolution row is malformed.
/// Non-convolution rows are skipped with a `warn!` diagnostic.
pub fn load_layer_table(path: &Path) -> Result<Vec<LayerShape>, ModelError> {
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_layer_table(&text)
}

/// Parses layer-table text. See [`load_layer_table`].
pub fn parse_layer_table(text: &str) -> Result<Vec<LayerShape>, ModelError> {
    let mut shapes = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let name = fields[0];
        if !name.to_ascii_lowercase().contains(CONV_TAG) {
            warn!(line = line_no, layer = name, "skipping non-convolution layer");
            continue;
        }
        if fields.len() != 8 {
            return Err(ModelError::Parse {
                line: line_no,
                reason: format!("expected 8 columns, found {}", fields.len()),
            });
        }

        let mut numbers = [0u64; 7];
        for (slot, raw) in numbers.iter_mut().zip(&fields[1..]) {
            *slot = raw.parse().map_err(|_| ModelError::Parse {
                line: line_no,
                reason: format!("bad numeric field `{raw}`"),
            })?;
        }
        let [in_h, in_w, k_h, k_w, in_channels, out_channels, stride] = numbers;

        if stride == 0 {
            return Err(ModelError::Parse {
                line: line_no,
                reason: "stride must be at least 1".to_string(),
            });
        }
        let out_h = out_extent(in_h, k_h, stride, line_no)?;
        let out_w = out_extent(in_w, k_w, stride, line_no)?;
        shapes.push(LayerShape {
            name: name.to_string(),
            in_obj_size: in_h * in_w,
            out_obj_size: out_h * out_w,
            in_channels,
            out_channels,
            kernel_size: k_h * k_w,
            stride,
        });
    }
    Ok(shapes)
}

/// Output extent of one spatial axis assuming symmetric padding. A kernel
/// wider than the input cannot produce an output.
fn out_extent(in_dim: u64, k_dim: u64, stride: u64, line: usize) -> Result<u64, ModelError> {
    let trimmed = in_dim
        .checked_sub(2 * (k_dim / 2))
        .ok_or_else(|| ModelError::Parse {
            line,
            reason: format!("kernel dimension {k_dim} does not fit input dimension {in_dim}"),
        })?;
    Ok(trimmed / stride)
}
