/*!
 * WebVTT (`.vtt`) parsing.
 *
 * Same block structure as SubRip with a dot millisecond delimiter, an
 * optional cue-identifier line, and optional cue settings after the end
 * timestamp. The `WEBVTT` header block carries no timing line and is skipped
 * by the shared scanner like any other timing-less block.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::CaptionTrack;
use crate::dedup;

// `-->` timing line, dot flavor, with room for cue settings after the end
// token. Token charsets are loose; exact field validation happens in the
// timestamp parser.
static TIMING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([\d:.]+) --> ([\d:.]+)(?:\s+\S.*)?\s*$").unwrap());

/// Parse WebVTT content into a de-duplicated, time-sorted caption track
pub fn parse(content: &str) -> CaptionTrack {
    let mut track = super::parse_cue_blocks(content, &TIMING);
    dedup::collapse_repeats(&mut track);
    track
}
