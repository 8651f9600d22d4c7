//! Capture table to curve document conversion.
//!
//! Row 0's timecode is the time origin. Every other row keeps its file
//! position even if its timecode runs backwards, so all curves share one
//! time sequence with one entry per row.

use std::path::Path;

use morphcurves_common::config::{DEFAULT_PLAYBACK_FPS, DEFAULT_TIMECODE_FPS};
use morphcurves_common::error::{MorphcurvesError, MorphcurvesResult};
use morphcurves_curve_model::{parse_timecode, CurveDocument, Curves, TimecodeError};

use crate::table::Table;

/// Column holding the capture timecode.
pub const TIMECODE_COLUMN: &str = "Timecode";

/// Columns that are never emitted as blendshape curves.
pub const EXCLUDED_CHANNELS: [&str; 11] = [
    TIMECODE_COLUMN,
    "BlendshapeCount",
    "HeadYaw",
    "HeadPitch",
    "HeadRoll",
    "LeftEyeYaw",
    "LeftEyePitch",
    "LeftEyeRoll",
    "RightEyeYaw",
    "RightEyePitch",
    "RightEyeRoll",
];

/// Conversion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Rate of the timecode's frame field.
    pub timecode_fps: f64,
    /// Playback rate written to the document.
    pub playback_fps: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            timecode_fps: DEFAULT_TIMECODE_FPS,
            playback_fps: DEFAULT_PLAYBACK_FPS,
        }
    }
}

/// Whether `name` is a non-blendshape column.
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_CHANNELS.contains(&name)
}

fn timecode_error(e: TimecodeError) -> MorphcurvesError {
    match e {
        TimecodeError::Malformed { .. } => MorphcurvesError::format(e.to_string()),
        TimecodeError::InvalidFrameRate { .. } => MorphcurvesError::Config {
            message: e.to_string(),
        },
    }
}

/// Seconds since row 0 for every row, in file order.
///
/// The `Timecode` column must be present even when the table has no rows.
pub fn relative_times(table: &Table, timecode_fps: f64) -> MorphcurvesResult<Vec<f64>> {
    let index = table
        .column_index(TIMECODE_COLUMN)
        .ok_or_else(|| MorphcurvesError::missing_column(TIMECODE_COLUMN))?;

    if table.row_count() == 0 {
        return Ok(Vec::new());
    }

    let absolute = table
        .cells(index)
        .map(|tc| parse_timecode(tc, timecode_fps))
        .collect::<Result<Vec<_>, _>>()
        .map_err(timecode_error)?;

    let t0 = absolute[0];
    Ok(absolute.into_iter().map(|t| t - t0).collect())
}

/// Convert a capture table into a curve document.
pub fn convert(
    table: &Table,
    timecode_fps: f64,
    playback_fps: u32,
) -> MorphcurvesResult<CurveDocument> {
    if !timecode_fps.is_finite() || timecode_fps <= 0.0 {
        return Err(timecode_error(TimecodeError::InvalidFrameRate {
            fps: timecode_fps,
        }));
    }

    let times = relative_times(table, timecode_fps)?;

    let mut curves = Curves::new();
    for (index, name) in table.headers().iter().enumerate() {
        if is_excluded(name) {
            continue;
        }
        let Some(values) = table.numeric_cells(index) else {
            tracing::debug!(column = %name, "Skipping non-numeric column");
            continue;
        };
        let curve = times.iter().zip(values).map(|(&t, v)| [t, v]).collect();
        curves.insert(name.clone(), curve);
    }

    let duration = times.iter().copied().reduce(f64::max).unwrap_or(0.0);

    Ok(CurveDocument {
        fps: playback_fps,
        duration,
        curves,
    })
}

/// Read `csv_path`, convert it, and write the pretty JSON document to `out_path`.
///
/// The output file is only written once conversion has fully succeeded.
pub fn csv_to_curve_json(
    csv_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> MorphcurvesResult<CurveDocument> {
    let csv_path = csv_path.as_ref();
    let out_path = out_path.as_ref();

    let table = Table::from_path(csv_path)?;
    tracing::info!(
        path = %csv_path.display(),
        rows = table.row_count(),
        columns = table.headers().len(),
        "Loaded capture table"
    );

    let document = convert(&table, options.timecode_fps, options.playback_fps)?;

    let json = document.to_json_pretty()?;
    std::fs::write(out_path, json).map_err(|e| MorphcurvesError::io_at(out_path, e))?;

    tracing::info!(
        path = %out_path.display(),
        channels = document.curves.len(),
        duration = document.duration,
        "Wrote curve document"
    );

    Ok(document)
}
