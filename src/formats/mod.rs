/*!
 * Subtitle container formats: detection, parsing, shared cue machinery.
 *
 * The format of a file is decided by its extension alone; content is never
 * sniffed. The two cue-block formats (`.srt`, `.vtt`) share one block
 * scanner and one multi-line normalization pass, and both collapse
 * duplicated caption runs automatically at parse time. SubStation
 * Alpha (`.ass`) documents are different: captions do not exist until the
 * caller selects styles, see [`ass::AssDocument`].
 */

pub mod ass;
pub mod srt;
pub mod vtt;

use std::path::Path;

use anyhow::Result;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::{Caption, CaptionTrack};
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::timecode::Timecode;

// Markup and control sequences ignored when deciding how to join the lines of
// a multi-line cue. The raw lines themselves are joined untouched.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["\u{200E}", "&lrm;", "&nbsp;", "<.*?>", r"\{.*?\}"]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

/// Recognized subtitle containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubStation Alpha document with named style channels
    Ass,
    /// `-->` timing lines, comma millisecond delimiter, numeric cue identifiers
    Srt,
    /// `-->` timing lines, dot millisecond delimiter, optional cue settings
    Vtt,
}

impl SubtitleFormat {
    /// Decide the format from a path's extension, case-insensitively.
    /// The file content never participates in the decision.
    pub fn from_path(path: &Path) -> Result<Self, SubtitleError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    /// Decide the format from a bare extension string
    pub fn from_extension(extension: &str) -> Result<Self, SubtitleError> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "ass" => Ok(SubtitleFormat::Ass),
            "srt" => Ok(SubtitleFormat::Srt),
            "vtt" => Ok(SubtitleFormat::Vtt),
            other => Err(SubtitleError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Canonical extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Ass => "ass",
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
        }
    }
}

/// One parsed subtitle file, tagged by its source format
#[derive(Debug)]
pub enum Subtitle {
    /// SubStation Alpha document, awaiting style selection
    Ass(ass::AssDocument),
    /// SubRip track, normalized and de-duplicated
    Srt(CaptionTrack),
    /// WebVTT track, normalized and de-duplicated
    Vtt(CaptionTrack),
}

impl Subtitle {
    /// Read and parse a subtitle file, picking the parser from the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let format = SubtitleFormat::from_path(path)?;
        let content = FileManager::read_to_string(path)?;
        Ok(Self::parse(format, &content))
    }

    /// Parse subtitle content that is already in memory
    pub fn parse(format: SubtitleFormat, content: &str) -> Self {
        match format {
            SubtitleFormat::Ass => Subtitle::Ass(ass::AssDocument::parse(content)),
            SubtitleFormat::Srt => Subtitle::Srt(srt::parse(content)),
            SubtitleFormat::Vtt => Subtitle::Vtt(vtt::parse(content)),
        }
    }

    /// The format this subtitle was parsed from
    pub fn format(&self) -> SubtitleFormat {
        match self {
            Subtitle::Ass(_) => SubtitleFormat::Ass,
            Subtitle::Srt(_) => SubtitleFormat::Srt,
            Subtitle::Vtt(_) => SubtitleFormat::Vtt,
        }
    }
}

/// Scan blank-line-separated cue blocks, taking timing from the first line
/// the given regex recognizes and every following line as cue text.
///
/// Lines before the timing line (cue identifiers, section headers) are
/// skipped, as are blocks without any timing line. A cue whose timestamp
/// tokens fail to parse is dropped with a warning and scanning continues.
pub(crate) fn parse_cue_blocks(content: &str, timing: &Regex) -> CaptionTrack {
    let normalized = content.replace("\r\n", "\n");
    let mut track = CaptionTrack::new();

    for block in normalized.split("\n\n") {
        let mut timing_caps = None;
        let mut text_lines = Vec::new();

        for line in block.lines() {
            if timing_caps.is_none() {
                if let Some(caps) = timing.captures(line) {
                    timing_caps = Some(caps);
                }
                continue;
            }
            text_lines.push(line);
        }

        let Some(caps) = timing_caps else { continue };
        if text_lines.is_empty() {
            continue;
        }

        let start = match Timecode::parse(&caps[1]) {
            Ok(time) => time,
            Err(e) => {
                warn!("Dropping cue: {}", e);
                continue;
            }
        };
        let end = match Timecode::parse(&caps[2]) {
            Ok(time) => time,
            Err(e) => {
                warn!("Dropping cue: {}", e);
                continue;
            }
        };

        track.push(Caption::new(start, end, normalize_cue_text(&text_lines)));
    }

    track
}

/// Join the physical lines of one cue into a single display line.
///
/// A single line passes through unchanged. For multi-line cues, each line is
/// first stripped of the known noise patterns (a stripped-empty line becomes
/// one ideographic-space placeholder so the test below stays well-defined).
/// When every stripped line opens with the same parenthesis character, `(` or
/// `（`, the cue is a multi-speaker parenthetical list and the original lines
/// are joined with `　-`; otherwise soft-wrapped lines are flattened with a
/// plain `　`. The stripped copies only drive the decision; the join always
/// uses the original lines.
pub(crate) fn normalize_cue_text(lines: &[&str]) -> String {
    if lines.len() == 1 {
        return lines[0].to_string();
    }

    let stripped: Vec<String> = lines
        .iter()
        .map(|line| {
            let mut cleaned = line.to_string();
            for pattern in NOISE_PATTERNS.iter() {
                cleaned = pattern.replace_all(&cleaned, "").into_owned();
            }
            if cleaned.is_empty() {
                cleaned.push('　');
            }
            cleaned
        })
        .collect();

    let mut first_chars = stripped.iter().map(|line| line.chars().next());
    let parenthetical = match first_chars.next().flatten() {
        Some(first @ ('(' | '（')) => first_chars.all(|c| c == Some(first)),
        _ => false,
    };

    if parenthetical {
        lines.join("　-")
    } else {
        lines.join("　")
    }
}
