/*!
 * Caption entries and ordered caption tracks.
 *
 * A [`Caption`] is one timed cue. A [`CaptionTrack`] is the list of cues for
 * one language channel, plus a marker recording whether the track was built
 * from a bilingual style selection (in which case plain-text extraction is
 * refused and the track must go through the paired-table exporter instead).
 */

use crate::errors::SubtitleError;
use crate::timecode::Timecode;

/// One timed subtitle cue. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caption {
    start: Timecode,
    end: Timecode,
    text: String,
}

impl Caption {
    /// Create a new caption
    pub fn new(start: Timecode, end: Timecode, text: String) -> Self {
        Caption { start, end, text }
    }

    /// Start of the display interval
    pub fn start(&self) -> Timecode {
        self.start
    }

    /// End of the display interval
    pub fn end(&self) -> Timecode {
        self.end
    }

    /// Cue text, possibly spanning multiple joined lines
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Timing key used when pairing captions across language channels
    pub fn key(&self) -> (Timecode, Timecode) {
        (self.start, self.end)
    }

    /// Combine two cues of a contiguous run into one spanning cue.
    ///
    /// The result keeps this caption's text and start and takes the other
    /// caption's end. The caller is responsible for only merging cues whose
    /// intervals actually touch.
    pub fn merged_with(&self, other: &Caption) -> Caption {
        Caption {
            start: self.start,
            end: other.end,
            text: self.text.clone(),
        }
    }
}

/// Ordered collection of captions for a single channel
#[derive(Debug, Clone, Default)]
pub struct CaptionTrack {
    pub(crate) captions: Vec<Caption>,
    pub(crate) bilingual: bool,
}

impl CaptionTrack {
    /// Create an empty track
    pub fn new() -> Self {
        CaptionTrack::default()
    }

    /// Create a track from an existing list of captions
    pub fn from_captions(captions: Vec<Caption>) -> Self {
        CaptionTrack {
            captions,
            bilingual: false,
        }
    }

    /// Append one caption, keeping insertion order
    pub fn push(&mut self, caption: Caption) {
        self.captions.push(caption);
    }

    /// Append every caption of another track
    pub fn append(&mut self, other: &mut CaptionTrack) {
        self.captions.append(&mut other.captions);
    }

    /// Number of captions in the track
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// True when the track holds no captions
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Iterate over the captions in their current order
    pub fn iter(&self) -> std::slice::Iter<'_, Caption> {
        self.captions.iter()
    }

    /// The captions as a slice, in their current order
    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// True when the track came from a bilingual style selection
    pub fn is_bilingual(&self) -> bool {
        self.bilingual
    }

    /// Sort captions by start time. The sort is stable, so cues that share a
    /// start time keep their relative order.
    pub fn sort_by_start(&mut self) {
        self.captions.sort_by_key(|c| c.start());
    }

    /// Join every cue text with a newline, in current track order.
    ///
    /// Refused for bilingual tracks: flattening two interleaved languages into
    /// one text stream would scramble them.
    pub fn extract_text(&self) -> Result<String, SubtitleError> {
        if self.bilingual {
            return Err(SubtitleError::BilingualTrack);
        }

        let lines: Vec<&str> = self.captions.iter().map(|c| c.text()).collect();
        Ok(lines.join("\n"))
    }
}

impl IntoIterator for CaptionTrack {
    type Item = Caption;
    type IntoIter = std::vec::IntoIter<Caption>;

    fn into_iter(self) -> Self::IntoIter {
        self.captions.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaptionTrack {
    type Item = &'a Caption;
    type IntoIter = std::slice::Iter<'a, Caption>;

    fn into_iter(self) -> Self::IntoIter {
        self.captions.iter()
    }
}
