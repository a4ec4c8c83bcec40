/*!
 * SubStation Alpha (`.ass`) documents.
 *
 * An `.ass` file declares named styles in one section and dialogue events in
 * another, each event tagged with a style name. Captions do not exist until
 * the caller commits to a set of styles: [`AssDocument::parse`] discovers the
 * declared names, [`AssDocument::select`] routes events into per-style
 * buckets and classifies the selection as bilingual when the chosen names
 * cover both language channels.
 */

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::caption::{Caption, CaptionTrack};
use crate::errors::SubtitleError;
use crate::timecode::Timecode;

// Style declaration inside the styles section
static STYLE_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Style: (.+?),").unwrap());

// Brace-delimited override blocks embedded in event text
static OVERRIDE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{.*?\}").unwrap());

// Comma-separated pieces of an event line: 9 metadata fields, then free text
const EVENT_FIELDS: usize = 10;

/// Remove `{...}` override blocks from caption text
pub fn strip_override_tags(text: &str) -> String {
    OVERRIDE_BLOCK.replace_all(text, "").into_owned()
}

/// Language channel a style name maps to, by naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Primary language, style names containing `jp`
    Primary,
    /// Secondary language, style names containing `cn`
    Secondary,
}

/// Classify a style name by the fixed case-insensitive naming convention.
///
/// A name containing `jp` is the primary channel; otherwise a name
/// containing `cn` is the secondary channel. First match wins, so a name
/// containing both tokens counts as primary only.
pub fn classify_style(name: &str) -> Option<Channel> {
    let lowered = name.to_lowercase();
    if lowered.contains("jp") {
        Some(Channel::Primary)
    } else if lowered.contains("cn") {
        Some(Channel::Secondary)
    } else {
        None
    }
}

/// A parsed SubStation Alpha document: declared style names plus the raw
/// event lines, held until the caller selects which styles to keep
#[derive(Debug, Clone, Default)]
pub struct AssDocument {
    styles: Vec<String>,
    event_lines: Vec<String>,
}

impl AssDocument {
    /// Parse the blank-line-separated sections of a document. Style names
    /// come from the styles section; event lines from the events section,
    /// past its two header lines (section name and field format).
    pub fn parse(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let mut styles = Vec::new();
        let mut event_lines = Vec::new();

        for section in normalized.split("\n\n") {
            match section.lines().next().map(str::trim) {
                Some("[V4+ Styles]") => {
                    styles = STYLE_DECL
                        .captures_iter(section)
                        .map(|caps| caps[1].to_string())
                        .collect();
                }
                Some("[Events]") => {
                    event_lines = section.lines().skip(2).map(str::to_string).collect();
                }
                _ => {}
            }
        }

        AssDocument {
            styles,
            event_lines,
        }
    }

    /// Declared style names, in declaration order
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Route events whose style tag is among `picked` into per-style buckets.
    ///
    /// Malformed event lines and events with unparseable timestamps are
    /// skipped with a warning; events tagged with unselected styles are
    /// ignored silently. Duplicate names in `picked` collapse to their first
    /// occurrence. Selected styles the document never uses simply produce
    /// empty buckets.
    pub fn select(&self, picked: &[String]) -> StyleSelection {
        let mut styles: Vec<String> = Vec::new();
        for style in picked {
            if !styles.contains(style) {
                styles.push(style.clone());
            }
        }

        let mut buckets: HashMap<String, CaptionTrack> = styles
            .iter()
            .map(|style| (style.clone(), CaptionTrack::new()))
            .collect();

        for line in &self.event_lines {
            if line.trim().is_empty() {
                continue;
            }

            let (start, end, style, text) = match parse_event_line(line) {
                Ok(parts) => parts,
                Err(e) => {
                    warn!("Skipping event: {}", e);
                    continue;
                }
            };

            let Some(bucket) = buckets.get_mut(style) else {
                continue;
            };
            bucket.push(Caption::new(start, end, text.to_string()));
        }

        let mut primary_styles = 0;
        let mut secondary_styles = 0;
        for style in &styles {
            match classify_style(style) {
                Some(Channel::Primary) => primary_styles += 1,
                Some(Channel::Secondary) => secondary_styles += 1,
                None => {}
            }
        }

        StyleSelection {
            styles,
            buckets,
            primary_styles,
            secondary_styles,
        }
    }
}

/// Split one event line into its timing, style tag, and free-text remainder.
/// The text field keeps embedded commas intact.
fn parse_event_line(line: &str) -> Result<(Timecode, Timecode, &str, &str), SubtitleError> {
    let fields: Vec<&str> = line.splitn(EVENT_FIELDS, ',').collect();
    if fields.len() != EVENT_FIELDS {
        return Err(SubtitleError::MalformedEventLine(line.to_string()));
    }

    let start = Timecode::parse(fields[1])?;
    let end = Timecode::parse(fields[2])?;
    Ok((start, end, fields[3], fields[9]))
}

/// Captions routed per selected style, plus the selection's language shape
#[derive(Debug)]
pub struct StyleSelection {
    styles: Vec<String>,
    buckets: HashMap<String, CaptionTrack>,
    primary_styles: usize,
    secondary_styles: usize,
}

impl StyleSelection {
    /// The selected styles, in selection order, duplicates removed
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Captions routed to one selected style
    pub fn bucket(&self, style: &str) -> Option<&CaptionTrack> {
        self.buckets.get(style)
    }

    /// Number of selected styles classified per channel, as `(jp, cn)`
    pub fn channel_counts(&self) -> (usize, usize) {
        (self.primary_styles, self.secondary_styles)
    }

    /// True when the selected styles cover both language channels
    pub fn is_bilingual(&self) -> bool {
        self.primary_styles > 0 && self.secondary_styles > 0
    }

    /// Concatenate every bucket, in selection order, into one flat track.
    ///
    /// Override blocks are stripped from the text here, at the boundary
    /// where captions leave the document. The flat track carries the
    /// selection's bilingual marker, so plain-text extraction on a bilingual
    /// selection stays refused downstream.
    pub fn flatten(&self) -> CaptionTrack {
        let mut track = CaptionTrack::new();
        for style in &self.styles {
            if let Some(bucket) = self.buckets.get(style) {
                for caption in bucket.iter() {
                    track.push(Caption::new(
                        caption.start(),
                        caption.end(),
                        strip_override_tags(caption.text()),
                    ));
                }
            }
        }
        track.bilingual = self.is_bilingual();
        track
    }
}
