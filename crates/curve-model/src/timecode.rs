//! Capture timecodes.
//!
//! Face capture exports stamp every row with `HH:MM:SS:FF.mmm`: hours,
//! minutes, seconds, a frame counter at the device's timecode rate, and a
//! sub-frame millisecond field. Field ranges are not checked, so `00:75:00:00.000`
//! is simply 75 minutes.

use std::fmt;
use std::str::FromStr;

/// Separators expected after each of the first four fields.
const SEPARATORS: [char; 4] = [':', ':', ':', '.'];

/// A parsed `HH:MM:SS:FF.mmm` timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub frames: u64,
    pub millis: u64,
}

/// Errors produced while reading timecodes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimecodeError {
    #[error("Bad timecode: {text}")]
    Malformed { text: String },

    #[error("Invalid timecode frame rate: {fps}")]
    InvalidFrameRate { fps: f64 },
}

impl Timecode {
    /// Elapsed seconds, interpreting the frame field at `fps_tc` frames per second.
    pub fn to_seconds(&self, fps_tc: f64) -> Result<f64, TimecodeError> {
        if !fps_tc.is_finite() || fps_tc <= 0.0 {
            return Err(TimecodeError::InvalidFrameRate { fps: fps_tc });
        }
        let whole =
            self.hours as f64 * 3600.0 + self.minutes as f64 * 60.0 + self.seconds as f64;
        Ok(whole + self.frames as f64 / fps_tc + self.millis as f64 / 1000.0)
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    /// Parses the leading `D+:D+:D+:D+.D+` of `text`; anything after the last
    /// digit run is ignored.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || TimecodeError::Malformed {
            text: text.to_string(),
        };

        let mut fields = [0u64; 5];
        let mut rest = text;
        for (i, field) in fields.iter_mut().enumerate() {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return Err(malformed());
            }
            let (run, tail) = rest.split_at(digits);
            *field = run.parse().map_err(|_| malformed())?;
            rest = tail;

            if let Some(&sep) = SEPARATORS.get(i) {
                rest = rest.strip_prefix(sep).ok_or_else(malformed)?;
            }
        }

        let [hours, minutes, seconds, frames, millis] = fields;
        Ok(Self {
            hours,
            minutes,
            seconds,
            frames,
            millis,
        })
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.frames, self.millis
        )
    }
}

/// Convert a timecode string to seconds.
///
/// Computes `hours*3600 + minutes*60 + seconds + frames/fps_tc + millis/1000`.
pub fn parse_timecode(text: &str, fps_tc: f64) -> Result<f64, TimecodeError> {
    text.parse::<Timecode>()?.to_seconds(fps_tc)
}
