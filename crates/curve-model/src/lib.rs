//! Morphcurves Curve Model
//!
//! Defines the data contracts shared by the extractor and the CLI:
//! - **Timecode:** `HH:MM:SS:FF.mmm` capture timestamps and their conversion to seconds
//! - **Document:** the `{fps, duration, curves}` JSON consumed by the runtime
//! - **Mapping:** source channel name to runtime morph target names
//!
//! Curve times are seconds relative to the first captured sample.

pub mod document;
pub mod mapping;
pub mod timecode;

pub use document::*;
pub use mapping::*;
pub use timecode::*;
