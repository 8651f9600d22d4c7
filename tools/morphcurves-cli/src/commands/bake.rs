//! Bake a curve document into frame keyframes.

use std::path::PathBuf;

use anyhow::Context;
use morphcurves_curve_model::{ChannelMapping, CurveDocument};
use morphcurves_extractor::bake::{bake, BakeOptions};

pub fn run(
    path: PathBuf,
    output: PathBuf,
    mapping: Option<PathBuf>,
    speed_ratio: f64,
    looping: bool,
) -> anyhow::Result<()> {
    let document = CurveDocument::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load curve document: {e}"))?;

    let mapping = match mapping {
        Some(mapping_path) => {
            let mapping = ChannelMapping::load(&mapping_path)
                .map_err(|e| anyhow::anyhow!("Failed to load mapping: {e}"))?;
            tracing::info!(path = %mapping_path.display(), rows = mapping.len(), "Mapping loaded");
            mapping
        }
        None => ChannelMapping::default(),
    };

    let baked = bake(
        &document,
        &mapping,
        &BakeOptions {
            speed_ratio,
            looping,
        },
    );
    baked
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {}", output.display());
    println!("  Tracks: {}", baked.tracks.len());
    if !baked.unmatched.is_empty() {
        println!("  Unmatched: {}", baked.unmatched.join(", "));
    }
    if !baked.skipped.is_empty() {
        println!("  Skipped (fewer than 2 samples): {}", baked.skipped.join(", "));
    }

    Ok(())
}
