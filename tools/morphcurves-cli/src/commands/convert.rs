//! Convert a capture table into a curve document.

use std::path::PathBuf;

use anyhow::Context;
use morphcurves_extractor::{csv_to_curve_json, ConvertOptions};

pub fn run(
    input: PathBuf,
    output: PathBuf,
    timecode_fps: f64,
    playback_fps: u32,
) -> anyhow::Result<()> {
    let options = ConvertOptions {
        timecode_fps,
        playback_fps,
    };

    let document = csv_to_curve_json(&input, &output, &options)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!("Wrote {}", output.display());
    println!("  Channels: {}", document.curves.len());
    println!("  Duration: {:.3}s", document.duration);
    println!("  Playback: {}fps (timecode {}fps)", document.fps, timecode_fps);

    Ok(())
}
