//! Tempo values and beat-time rebasing.
//!
//! Beat-times are timestamps measured in beats at a given tempo. A beat-time `t`
//! at tempo `b` sits `t / b` minutes into the song, so re-expressing it at a new
//! tempo is a proportional rescale. Absolute positions additionally carry a
//! per-difficulty millisecond offset that must stay fixed in real time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Milliseconds per minute (BPM × minutes = beats).
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// A tempo in beats per minute. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bpm(f64);

impl Bpm {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::InvalidTempo(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Length of `offset_ms` milliseconds expressed in beats at this tempo.
    pub fn offset_beats(self, offset_ms: i32) -> f64 {
        self.0 * f64::from(offset_ms) / MS_PER_MINUTE
    }

    /// Multiply this tempo by `ratio` (e.g. 3/2 turns 100 BPM into 150 BPM).
    pub fn scale(self, ratio: Ratio) -> Result<Self> {
        Self::new(self.0 * f64::from(ratio.numerator) / f64::from(ratio.denominator))
    }
}

impl TryFrom<f64> for Bpm {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Bpm> for f64 {
    fn from(bpm: Bpm) -> Self {
        bpm.0
    }
}

impl fmt::Display for Bpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer tempo ratio `numerator / denominator`, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    numerator: u32,
    denominator: u32,
}

impl Ratio {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(Error::InvalidRatio(format!("{numerator}/{denominator}")));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

impl FromStr for Ratio {
    type Err = Error;

    /// Accepts `"N/D"` or a bare `"N"` (meaning `N/1`).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRatio(s.to_string());
        let (numerator, denominator) = match s.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s.trim(), "1"),
        };
        let numerator = numerator.parse().map_err(|_| invalid())?;
        let denominator = denominator.parse().map_err(|_| invalid())?;
        Self::new(numerator, denominator).map_err(|_| invalid())
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Rescale a relative beat span from `source` to `target` tempo.
///
/// `time * target / source`. Equal tempos return `time` untouched so a no-op
/// conversion introduces no rounding noise.
pub fn rescale(time: f64, source: Bpm, target: Bpm) -> f64 {
    if source == target {
        return time;
    }
    time * target.get() / source.get()
}

/// Rescale an absolute beat-time that is anchored to a millisecond offset.
///
/// The offset is removed at the source tempo, the remainder is rescaled, and the
/// offset is added back at the target tempo. A beat-time lying exactly on the
/// offset therefore maps exactly onto the offset at the new tempo.
pub fn rescale_with_offset(time: f64, source: Bpm, target: Bpm, offset_ms: i32) -> f64 {
    if source == target {
        return time;
    }
    let source_offset = source.offset_beats(offset_ms);
    let target_offset = target.offset_beats(offset_ms);
    rescale(time - source_offset, source, target) + target_offset
}

/// A source/target tempo pair applied to every timestamp of a song.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoChange {
    pub source: Bpm,
    pub target: Bpm,
}

impl TempoChange {
    pub fn new(source: Bpm, target: Bpm) -> Self {
        Self { source, target }
    }

    /// Validate raw tempo values and build the pair.
    pub fn from_raw(source: f64, target: f64) -> Result<Self> {
        Ok(Self::new(Bpm::new(source)?, Bpm::new(target)?))
    }

    /// Convert an absolute position (note or obstacle start).
    pub fn position(&self, time: f64, offset_ms: i32) -> f64 {
        rescale_with_offset(time, self.source, self.target, offset_ms)
    }

    /// Convert a relative span (obstacle duration).
    pub fn span(&self, duration: f64) -> f64 {
        rescale(duration, self.source, self.target)
    }
}
