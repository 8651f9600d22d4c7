//! Curve documents.
//!
//! The canonical on-disk shape is
//! `{"fps": 60, "duration": 1.5, "curves": {"jawOpen": [[0.0, 0.1], ...]}}`.
//! Loading also accepts the two older layouts the runtime still reads:
//! `morphCurves` in place of `curves`, and a `channels` array of
//! `{name, keys: [{t, v}]}` objects.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Playback rate assumed when a document does not carry one.
pub const DEFAULT_DOCUMENT_FPS: u32 = 60;

/// One `[time_seconds, value]` sample.
pub type CurvePoint = [f64; 2];

/// Samples for one channel, in capture order.
pub type Curve = Vec<CurvePoint>;

/// Channel name to curve, in input column order.
pub type Curves = IndexMap<String, Curve>;

/// A set of named blendshape curves sharing one time base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument")]
pub struct CurveDocument {
    /// Playback rate for the runtime's keyframes.
    pub fps: u32,

    /// Largest relative sample time, in seconds.
    pub duration: f64,

    pub curves: Curves,
}

/// Quick statistics about a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub fps: u32,
    pub duration: f64,
    pub channel_count: usize,
    pub min_samples: usize,
    pub max_samples: usize,
}

impl DocumentSummary {
    /// Whether every channel has the same number of samples.
    pub fn is_aligned(&self) -> bool {
        self.min_samples == self.max_samples
    }
}

/// Errors that can occur when reading or writing curve documents.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid curve document: {message}")]
    ValidationError { message: String },
}

impl CurveDocument {
    /// Build a document, deriving `duration` from the curves.
    pub fn new(fps: u32, curves: Curves) -> Self {
        let duration = max_time(&curves);
        Self {
            fps,
            duration,
            curves,
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse any of the supported layouts.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json).map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the document to disk, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let json = self.to_json_pretty().map_err(|e| DocumentError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| DocumentError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn summary(&self) -> DocumentSummary {
        let lengths = self.curves.values().map(Vec::len);
        DocumentSummary {
            fps: self.fps,
            duration: self.duration,
            channel_count: self.curves.len(),
            min_samples: lengths.clone().min().unwrap_or(0),
            max_samples: lengths.max().unwrap_or(0),
        }
    }
}

/// Largest sample time across all curves, or 0.0 when there are none.
fn max_time(curves: &Curves) -> f64 {
    curves
        .values()
        .flatten()
        .map(|[t, _]| *t)
        .filter(|t| t.is_finite())
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |m| m.max(t))))
        .unwrap_or(0.0)
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    fps: Option<serde_json::Value>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    curves: Option<Curves>,
    #[serde(default, rename = "morphCurves")]
    morph_curves: Option<Curves>,
    #[serde(default)]
    channels: Option<Vec<RawChannel>>,
}

#[derive(Deserialize)]
struct RawChannel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    keys: Vec<RawKey>,
}

#[derive(Deserialize)]
struct RawKey {
    #[serde(alias = "time")]
    t: f64,
    #[serde(alias = "value")]
    v: f64,
}

impl TryFrom<RawDocument> for CurveDocument {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        let curves = if let Some(curves) = raw.curves {
            curves
        } else if let Some(curves) = raw.morph_curves {
            curves
        } else if let Some(channels) = raw.channels {
            channels
                .into_iter()
                .filter_map(|channel| {
                    let name = channel.name.filter(|n| !n.is_empty())?;
                    let curve = channel.keys.iter().map(|k| [k.t, k.v]).collect();
                    Some((name, curve))
                })
                .collect()
        } else {
            return Err(DocumentError::ValidationError {
                message: "expected one of `curves`, `morphCurves` or `channels`".to_string(),
            });
        };

        let fps = raw
            .fps
            .as_ref()
            .and_then(serde_json::Value::as_f64)
            .filter(|fps| fps.is_finite() && *fps >= 1.0 && *fps <= u32::MAX as f64)
            .map(|fps| fps.round() as u32)
            .unwrap_or(DEFAULT_DOCUMENT_FPS);

        let duration = raw
            .duration
            .filter(|d| d.is_finite())
            .unwrap_or_else(|| max_time(&curves));

        Ok(Self {
            fps,
            duration,
            curves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> CurveDocument {
        let mut curves = Curves::new();
        curves.insert("jawOpen".to_string(), vec![[0.0, 0.1], [0.5, 0.4]]);
        curves.insert("eyeBlinkLeft".to_string(), vec![[0.0, 1.0], [0.5, 0.0]]);
        CurveDocument::new(60, curves)
    }

    #[test]
    fn test_new_derives_duration() {
        let doc = sample_document();
        assert!((doc.duration - 0.5).abs() < 1e-12);
        assert!((CurveDocument::new(60, Curves::new()).duration).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let json = sample_document().to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"fps\": 60,\n  \"duration\": 0.5,\n  \"curves\": {"));
        // column order survives serialization
        let jaw = json.find("jawOpen").unwrap();
        let blink = json.find("eyeBlinkLeft").unwrap();
        assert!(jaw < blink);
    }

    #[test]
    fn test_document_roundtrip() {
        let doc = sample_document();
        let json = doc.to_json_pretty().unwrap();
        let parsed = CurveDocument::from_json_str(&json).unwrap();
        assert_eq!(doc, parsed);
    }

    #[test]
    fn test_roundtrip_preserves_shortest_repr_floats() {
        let mut curves = Curves::new();
        curves.insert(
            "jawOpen".to_string(),
            vec![
                [0.0, 0.9856906946328695],
                [0.1823003003003002, -0.23164964964964974],
                [0.3646006006006004, 5e-324],
            ],
        );
        let doc = CurveDocument::new(60, curves);

        let parsed = CurveDocument::from_json_str(&doc.to_json_pretty().unwrap()).unwrap();

        let bits = |d: &CurveDocument| -> Vec<[u64; 2]> {
            d.curves["jawOpen"]
                .iter()
                .map(|[t, v]| [t.to_bits(), v.to_bits()])
                .collect()
        };
        assert_eq!(bits(&parsed), bits(&doc));
        assert_eq!(parsed.duration.to_bits(), doc.duration.to_bits());
    }

    #[test]
    fn test_morph_curves_layout() {
        let json = r#"{"fps": 30, "morphCurves": {"mouthClose": [[0.0, 0.2], [2.0, 0.3]]}}"#;
        let doc = CurveDocument::from_json_str(json).unwrap();
        assert_eq!(doc.fps, 30);
        assert!((doc.duration - 2.0).abs() < 1e-12);
        assert_eq!(doc.curves["mouthClose"], vec![[0.0, 0.2], [2.0, 0.3]]);
    }

    #[test]
    fn test_channels_layout_accepts_both_key_spellings() {
        let json = r#"{
            "channels": [
                {
                    "name": "browInnerUp",
                    "keys": [{"t": 0.0, "v": 0.1}, {"time": 1.0, "value": 0.9}]
                },
                {"keys": [{"t": 0.0, "v": 0.0}]},
                {"name": "cheekPuff"}
            ]
        }"#;
        let doc = CurveDocument::from_json_str(json).unwrap();
        assert_eq!(doc.fps, DEFAULT_DOCUMENT_FPS);
        assert_eq!(doc.curves.len(), 2);
        assert_eq!(doc.curves["browInnerUp"], vec![[0.0, 0.1], [1.0, 0.9]]);
        assert!(doc.curves["cheekPuff"].is_empty());
    }

    #[test]
    fn test_curves_take_precedence() {
        let json = r#"{"curves": {"a": [[0.0, 1.0]]}, "morphCurves": {"b": [[0.0, 1.0]]}}"#;
        let doc = CurveDocument::from_json_str(json).unwrap();
        assert!(doc.curves.contains_key("a"));
        assert!(!doc.curves.contains_key("b"));
    }

    #[test]
    fn test_missing_curves_is_rejected() {
        let err = CurveDocument::from_json_str(r#"{"fps": 60}"#).unwrap_err();
        assert!(err.to_string().contains("morphCurves"));
    }

    #[test]
    fn test_non_numeric_fps_falls_back() {
        let doc = CurveDocument::from_json_str(r#"{"fps": "fast", "curves": {}}"#).unwrap();
        assert_eq!(doc.fps, DEFAULT_DOCUMENT_FPS);
    }

    #[test]
    fn test_summary() {
        let mut doc = sample_document();
        doc.curves.insert("short".to_string(), vec![[0.0, 0.0]]);
        let summary = doc.summary();
        assert_eq!(summary.channel_count, 3);
        assert_eq!(summary.min_samples, 1);
        assert_eq!(summary.max_samples, 2);
        assert!(!summary.is_aligned());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("morphcurves_test_document.json");
        let doc = sample_document();
        doc.save(&path).unwrap();
        let loaded = CurveDocument::load(&path).unwrap();
        assert_eq!(doc, loaded);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("morphcurves_no_such_document.json");
        let _ = std::fs::remove_file(&path);
        let err = CurveDocument::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::IoError { .. }));
    }
}
