//! Morphcurves Extractor
//!
//! Turns a blendshape capture table into a curve document:
//! - **Table:** CSV loading and per-column numeric typing
//! - **Extract:** timecode normalization, channel filtering, JSON output
//! - **Bake:** frame-numbered keyframes for runtimes that count frames

pub mod bake;
pub mod extract;
pub mod table;

pub use extract::{convert, csv_to_curve_json, ConvertOptions};
pub use table::Table;
