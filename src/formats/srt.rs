/*!
 * SubRip (`.srt`) parsing.
 *
 * Cue blocks are separated by blank lines; each carries a numeric identifier
 * line, a timing line with comma-delimited milliseconds, and the cue text.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::CaptionTrack;
use crate::dedup;

// `-->` timing line, comma flavor. Token charsets are loose; exact field
// validation happens in the timestamp parser.
static TIMING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([\d:,]+) --> ([\d:,]+)\s*$").unwrap());

/// Parse SubRip content into a de-duplicated, time-sorted caption track
pub fn parse(content: &str) -> CaptionTrack {
    let mut track = super::parse_cue_blocks(content, &TIMING);
    dedup::collapse_repeats(&mut track);
    track
}
