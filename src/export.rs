//! Writers for the artifacts handed to downstream tools.
//!
//! ```text
//! AdjacencyTensor → export_tensor_json() → {"shape": [3, N, N], "layers": [...]}
//!                 → export_tensor_text() → one block per layer, for eyeballing
//! [FrameLabel]    → write_frame_labels() → JSON array (valid JSON5)
//! ```

use std::io::Write;

use serde::Serialize;

use crate::labels::FrameLabel;
use crate::model::*;
use crate::Result;

#[derive(Serialize)]
struct TensorDocument {
    shape: [usize; 3],
    layers: Vec<Vec<Vec<f32>>>,
}

/// Write the tensor as nested JSON, layers in LOWER, SAME, HIGHER order.
pub fn export_tensor_json(tensor: &AdjacencyTensor, writer: &mut dyn Write) -> Result<()> {
    let doc = TensorDocument {
        shape: tensor.shape(),
        layers: HeightLayer::ALL.iter().map(|&l| tensor.layer_rows(l)).collect(),
    };
    serde_json::to_writer(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a per-layer text dump of the tensor.
pub fn export_tensor_text(tensor: &AdjacencyTensor, writer: &mut dyn Write) -> Result<()> {
    let [layers, n, _] = tensor.shape();

    // Header
    writeln!(writer, "# height-layered adjacency")?;
    writeln!(writer, "# shape: {layers} x {n} x {n}")?;

    for layer in HeightLayer::ALL {
        writeln!(writer)?;
        writeln!(writer, "[{layer}] nonzero: {}", tensor.support(layer).len())?;
        for row in tensor.layer_rows(layer) {
            let cells: Vec<String> = row.iter().map(|v| format_weight(*v)).collect();
            writeln!(writer, "{}", cells.join(" "))?;
        }
    }
    Ok(())
}

/// Write per-frame labels as a JSON array.
pub fn write_frame_labels(labels: &[FrameLabel], writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer(&mut *writer, labels)?;
    writeln!(writer)?;
    Ok(())
}

fn format_weight(v: f32) -> String {
    if v == 0.0 { "0".to_string() } else { format!("{v:.4}") }
}
