//! Show curve document information.

use std::path::PathBuf;

use morphcurves_curve_model::CurveDocument;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let document = CurveDocument::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load curve document: {e}"))?;
    let summary = document.summary();

    println!("Curve document: {}", path.display());
    println!("  FPS: {}", summary.fps);
    println!("  Duration: {:.3}s", summary.duration);
    println!("  Channels: {}", summary.channel_count);
    if summary.is_aligned() {
        println!("  Samples per channel: {}", summary.max_samples);
    } else {
        println!(
            "  Samples per channel: {}..{} (channels are not aligned)",
            summary.min_samples, summary.max_samples
        );
    }
    println!();

    for (name, curve) in &document.curves {
        let (min, max) = curve
            .iter()
            .map(|[_, v]| *v)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if curve.is_empty() {
            println!("  {name}: empty");
        } else {
            println!("  {name}: {} samples, range {min:.3}..{max:.3}", curve.len());
        }
    }

    Ok(())
}
