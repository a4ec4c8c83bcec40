/*!
 * Millisecond time-codes for subtitle cues.
 *
 * A [`Timecode`] wraps a total duration in milliseconds and knows how to parse
 * the timestamp shapes found in the supported subtitle formats: `H:MM:SS.cc`
 * (centisecond precision), `HH:MM:SS,mmm` and `HH:MM:SS.mmm`.
 */

use std::fmt;
use std::str::FromStr;

use crate::errors::SubtitleError;

/// A point on the subtitle timeline, stored as milliseconds from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timecode(u64);

impl Timecode {
    /// Create a time-code from a raw millisecond count
    pub fn from_millis(ms: u64) -> Self {
        Timecode(ms)
    }

    /// Total milliseconds from zero
    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse a timestamp of the form `hours:minutes:seconds` followed by a
    /// fraction separated with `,` or `.`.
    ///
    /// A two-digit fraction is centiseconds and is scaled to milliseconds, so
    /// `0:01:02.50` and `00:01:02,500` name the same instant. Anything that
    /// does not split into exactly four numeric fields is rejected.
    pub fn parse(timestamp: &str) -> Result<Self, SubtitleError> {
        let trimmed = timestamp.trim();
        let parts: Vec<&str> = trimmed.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(SubtitleError::MalformedTimestamp(timestamp.to_string()));
        }

        let mut fields = [0u64; 4];
        for (i, part) in parts.iter().enumerate() {
            fields[i] = part
                .parse()
                .map_err(|_| SubtitleError::MalformedTimestamp(timestamp.to_string()))?;
        }

        let millis = if parts[3].len() == 2 {
            fields[3] * 10
        } else {
            fields[3]
        };

        Ok(Timecode(
            fields[0] * 3_600_000 + fields[1] * 60_000 + fields[2] * 1_000 + millis,
        ))
    }
}

impl fmt::Display for Timecode {
    /// Render as `HH:MM:SS.mmm`; hours are not wrapped at 24
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hours = self.0 / 3_600_000;
        let minutes = (self.0 % 3_600_000) / 60_000;
        let seconds = (self.0 % 60_000) / 1_000;
        let millis = self.0 % 1_000;

        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

impl FromStr for Timecode {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timecode::parse(s)
    }
}
