//! Keyframe baking.
//!
//! Runtimes such as Babylon animate morph target influence on a frame clock.
//! Baking resolves each curve onto its mapped targets and rewrites sample
//! times as frame numbers at the document's playback rate.

use std::path::Path;

use morphcurves_common::error::{MorphcurvesError, MorphcurvesResult};
use morphcurves_curve_model::{ChannelMapping, Curve, CurveDocument};
use serde::{Deserialize, Serialize};

/// Curves whose last sample time is at or below this are in seconds;
/// anything longer is assumed to already be in frames.
pub const SECONDS_THRESHOLD: f64 = 300.0;

/// Playback settings carried into the baked output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakeOptions {
    pub speed_ratio: f64,
    pub looping: bool,
}

impl Default for BakeOptions {
    fn default() -> Self {
        Self {
            speed_ratio: 1.0,
            looping: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BakedKey {
    pub frame: f64,
    pub value: f64,
}

/// Keys for one source channel driving one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedTrack {
    pub source: String,
    pub target: String,
    pub keys: Vec<BakedKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakedAnimation {
    pub fps: u32,
    pub speed_ratio: f64,
    pub looping: bool,
    pub tracks: Vec<BakedTrack>,
    /// Channels whose mapping resolved to no target.
    pub unmatched: Vec<String>,
    /// Channels with fewer than two usable samples.
    pub skipped: Vec<String>,
}

impl BakedAnimation {
    pub fn save(&self, path: impl AsRef<Path>) -> MorphcurvesResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| MorphcurvesError::io_at(path, e))
    }
}

/// Finite samples sorted by time.
fn usable_samples(curve: &Curve) -> Curve {
    let mut samples: Curve = curve
        .iter()
        .copied()
        .filter(|[t, v]| t.is_finite() && v.is_finite())
        .collect();
    samples.sort_by(|a, b| a[0].total_cmp(&b[0]));
    samples
}

/// Bake every curve in `document` onto the targets given by `mapping`.
pub fn bake(
    document: &CurveDocument,
    mapping: &ChannelMapping,
    options: &BakeOptions,
) -> BakedAnimation {
    let fps = f64::from(document.fps);
    let mut tracks = Vec::new();
    let mut unmatched = Vec::new();
    let mut skipped = Vec::new();

    for (source, curve) in &document.curves {
        let samples = usable_samples(curve);
        if samples.len() < 2 {
            skipped.push(source.clone());
            continue;
        }

        let targets = mapping.targets_for(source);
        if targets.is_empty() {
            unmatched.push(source.clone());
            continue;
        }

        let last_time = samples[samples.len() - 1][0];
        let scale = if last_time <= SECONDS_THRESHOLD { fps } else { 1.0 };
        let keys: Vec<BakedKey> = samples
            .iter()
            .map(|&[t, v]| BakedKey {
                frame: t * scale,
                value: v,
            })
            .collect();

        for target in targets {
            tracks.push(BakedTrack {
                source: source.clone(),
                target,
                keys: keys.clone(),
            });
        }
    }

    tracing::debug!(
        tracks = tracks.len(),
        unmatched = unmatched.len(),
        skipped = skipped.len(),
        "Baked curve document"
    );

    BakedAnimation {
        fps: document.fps,
        speed_ratio: options.speed_ratio,
        looping: options.looping,
        tracks,
        unmatched,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphcurves_curve_model::Curves;

    fn document(curves: &[(&str, Curve)]) -> CurveDocument {
        let curves: Curves = curves
            .iter()
            .map(|(name, curve)| (name.to_string(), curve.clone()))
            .collect();
        CurveDocument::new(60, curves)
    }

    #[test]
    fn test_seconds_become_frames() {
        let doc = document(&[("jawOpen", vec![[0.0, 0.0], [0.5, 1.0]])]);
        let baked = bake(&doc, &ChannelMapping::default(), &BakeOptions::default());
        assert_eq!(baked.tracks.len(), 1);
        let track = &baked.tracks[0];
        assert_eq!(track.source, "jawOpen");
        assert_eq!(track.target, "jawopen");
        assert_eq!(
            track.keys,
            vec![
                BakedKey {
                    frame: 0.0,
                    value: 0.0
                },
                BakedKey {
                    frame: 30.0,
                    value: 1.0
                },
            ]
        );
    }

    #[test]
    fn test_long_curves_are_treated_as_frames() {
        let doc = document(&[("a", vec![[0.0, 0.0], [600.0, 1.0]])]);
        let baked = bake(&doc, &ChannelMapping::default(), &BakeOptions::default());
        assert_eq!(baked.tracks[0].keys[1].frame, 600.0);
    }

    #[test]
    fn test_samples_are_sorted_and_filtered() {
        let doc = document(&[("a", vec![[1.0, 0.3], [f64::NAN, 0.5], [0.0, 0.1]])]);
        let baked = bake(&doc, &ChannelMapping::default(), &BakeOptions::default());
        let frames: Vec<f64> = baked.tracks[0].keys.iter().map(|k| k.frame).collect();
        assert_eq!(frames, vec![0.0, 60.0]);
    }

    #[test]
    fn test_short_curves_are_skipped() {
        let doc = document(&[
            ("a", vec![[0.0, 1.0]]),
            ("b", vec![[0.0, 1.0], [f64::INFINITY, 0.0]]),
        ]);
        let baked = bake(&doc, &ChannelMapping::default(), &BakeOptions::default());
        assert!(baked.tracks.is_empty());
        assert_eq!(baked.skipped, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_mapping_fans_out_and_reports_unmatched() {
        let mapping =
            ChannelMapping::parse("ARKit,Targets\nmouthSmileLeft,Smile_L|Cheek_L\njawOpen,|\n");
        let doc = document(&[
            ("mouthSmileLeft", vec![[0.0, 0.0], [1.0, 1.0]]),
            ("jawOpen", vec![[0.0, 0.0], [1.0, 1.0]]),
        ]);
        let options = BakeOptions {
            speed_ratio: 0.5,
            looping: false,
        };
        let baked = bake(&doc, &mapping, &options);
        let targets: Vec<&str> = baked.tracks.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(targets, vec!["smile_l", "cheek_l"]);
        assert_eq!(baked.unmatched, vec!["jawOpen".to_string()]);
        assert_eq!(baked.speed_ratio, 0.5);
        assert!(!baked.looping);
    }
}
