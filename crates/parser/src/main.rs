use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use parser::{LayerView, NMS_ROW_WIDTH, ParserConfig, PostProcessor, logging::setup_logging};

/// Run the YOLOR NMS parser over a dumped output tensor.
///
/// The file holds raw native-endian f32 values, six per row
/// (x1, y1, x2, y2, score, class). Network size and thresholds come from
/// NETWORK_WIDTH, NETWORK_HEIGHT, CONFIDENCE_THRESHOLD, NUM_CLASSES and
/// CLASS_THRESHOLDS. Detections are printed to stdout as JSON lines.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw f32 tensor dump
    #[arg(value_name = "FILE")]
    tensor: PathBuf,

    /// Only parse the first N rows (mimics the runtime reporting a smaller N)
    #[arg(long, value_name = "ROWS")]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ParserConfig::from_env()?;

    setup_logging(&config)?;

    tracing::info!(
        network = ?config.network,
        classes = config.thresholds.len(),
        "Loaded configuration"
    );

    let buffer = load_tensor(&args.tensor)?;
    let available_rows = buffer.len() / NMS_ROW_WIDTH;
    let rows = args.limit.map_or(available_rows, |n| n.min(available_rows));
    let dims = [
        u32::try_from(rows).context("Row count does not fit the tensor shape")?,
        NMS_ROW_WIDTH as u32,
    ];

    let post_processor = PostProcessor::new(config.thresholds);
    let detections =
        post_processor.parse_detections(LayerView::new(&dims, &buffer), config.network)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for detection in &detections {
        serde_json::to_writer(&mut out, detection)?;
        writeln!(out)?;
    }

    tracing::info!(
        path = %args.tensor.display(),
        rows,
        detections = detections.len(),
        "Parsed tensor"
    );

    Ok(())
}

fn load_tensor(path: &Path) -> anyhow::Result<Vec<f32>> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read tensor {}", path.display()))?;

    if bytes.len() % std::mem::size_of::<f32>() != 0 {
        anyhow::bail!(
            "Tensor {} is {} bytes, not a whole number of f32 values",
            path.display(),
            bytes.len()
        );
    }

    let values: Vec<f32> = bytemuck::pod_collect_to_vec(&bytes);
    if values.len() % NMS_ROW_WIDTH != 0 {
        tracing::warn!(
            trailing = values.len() % NMS_ROW_WIDTH,
            "Tensor length is not a multiple of the row width, ignoring trailing values"
        );
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_tensor_roundtrips_f32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nms.bin");
        let values = [10.0f32, 10.0, 50.0, 60.0, 0.9, 0.0];
        fs::write(&path, bytemuck::cast_slice::<f32, u8>(&values)).unwrap();

        assert_eq!(load_tensor(&path).unwrap(), values.to_vec());
    }

    #[test]
    fn test_load_tensor_rejects_partial_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bin");
        fs::write(&path, [0u8; 7]).unwrap();

        assert!(load_tensor(&path).is_err());
    }
}
