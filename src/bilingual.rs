/*!
 * Bilingual record pairing.
 *
 * Aligns the two language channels of a style selection into ordered
 * `(primary, secondary)` record pairs keyed by cue timing, and moves those
 * pairs between the two table representations: a flat two-line-per-record
 * text file and a tabular spreadsheet.
 *
 * The secondary side of a record may carry a translator comment after a
 * single backslash (`text\comment`); a missing secondary is the `#`
 * sentinel. Both conventions come from the tabular layout, where the
 * comment occupies a third cell of its own.
 */

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;

use crate::caption::CaptionTrack;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::formats::ass::{Channel, StyleSelection, classify_style, strip_override_tags};
use crate::timecode::Timecode;

/// Sentinel for a record with no secondary-language text
pub const MISSING_SECONDARY: &str = "#";

/// One aligned pair of caption texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BilingualRecord {
    /// Primary-language text, empty when this timing only appeared in the
    /// secondary channel
    pub primary: String,
    /// Secondary-language text, possibly `text\comment`, or the `#` sentinel
    pub secondary: String,
}

impl BilingualRecord {
    /// Create a new record
    pub fn new(primary: String, secondary: String) -> Self {
        BilingualRecord { primary, secondary }
    }

    /// Split the secondary side into its text and optional comment at the
    /// first backslash
    pub fn secondary_parts(&self) -> (&str, Option<&str>) {
        match self.secondary.split_once('\\') {
            Some((value, comment)) => (value, Some(comment)),
            None => (self.secondary.as_str(), None),
        }
    }
}

/// Ordered sequence of bilingual records. Row order is meaningful and is
/// preserved through load/export round trips.
#[derive(Debug, Clone, Default)]
pub struct BilingualTable {
    records: Vec<BilingualRecord>,
}

impl BilingualTable {
    /// Build a table from existing records, keeping their order
    pub fn from_records(records: Vec<BilingualRecord>) -> Self {
        BilingualTable { records }
    }

    /// Align the two language channels of a style selection.
    ///
    /// Every selected style's bucket is folded into its channel's timing map
    /// (later captions win on a timing collision). The record sequence is
    /// the sorted union of both channels' timing keys, so a cue present in
    /// only one channel still produces a record, with the other side empty.
    /// Override blocks are stripped from both sides.
    pub fn from_selection(selection: &StyleSelection) -> Result<Self, SubtitleError> {
        if !selection.is_bilingual() {
            let (jp, cn) = selection.channel_counts();
            return Err(SubtitleError::MissingLanguageChannel { jp, cn });
        }

        let mut primary = HashMap::new();
        let mut secondary = HashMap::new();
        for style in selection.styles() {
            let channel_map = match classify_style(style) {
                Some(Channel::Primary) => &mut primary,
                Some(Channel::Secondary) => &mut secondary,
                None => continue,
            };
            if let Some(bucket) = selection.bucket(style) {
                for caption in bucket.iter() {
                    channel_map.insert(caption.key(), caption.text().to_string());
                }
            }
        }

        Ok(BilingualTable {
            records: aligned_records(primary, secondary),
        })
    }

    /// Align two explicit channels. Callers that already know which track
    /// carries which language bypass the style-name classification.
    pub fn from_tracks(primary: &CaptionTrack, secondary: &CaptionTrack) -> Self {
        BilingualTable {
            records: aligned_records(timing_map(primary), timing_map(secondary)),
        }
    }

    /// Load a table from a flat text file or a workbook, by extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => {
                let content = FileManager::read_to_string(path)?;
                Ok(Self::from_flat_text(&content))
            }
            "xlsx" => Self::from_workbook(path),
            other => Err(SubtitleError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    /// Read records back from the flat two-line format.
    ///
    /// The writer puts the secondary line first in every block, so the
    /// reader swaps the pair back to primary-first. This asymmetry is the
    /// format convention, not an accident. A one-line block loads with an
    /// empty primary.
    pub fn from_flat_text(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return BilingualTable::default();
        }

        let records = trimmed
            .split("\n\n")
            .map(|block| match block.split_once('\n') {
                Some((secondary, primary)) => BilingualRecord {
                    primary: primary.to_string(),
                    secondary: secondary.to_string(),
                },
                None => BilingualRecord {
                    primary: String::new(),
                    secondary: block.to_string(),
                },
            })
            .collect();

        BilingualTable { records }
    }

    /// Read records from the first sheet of a workbook.
    ///
    /// Rows follow the cell shape `(primary, secondary, comment)`. A missing
    /// secondary becomes the `#` sentinel; a comment is folded into the
    /// secondary as `secondary\comment`. Fully empty rows are skipped and
    /// cells past the third are ignored.
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range
                .with_context(|| format!("Failed to read first sheet of {}", path.display()))?,
            None => return Err(anyhow!("Workbook has no sheets: {}", path.display())),
        };

        let mut records = Vec::new();
        for row in range.rows() {
            let mut cells = row.iter().take(3).map(|cell| match cell {
                Data::Empty => None,
                Data::String(text) if text.is_empty() => None,
                Data::String(text) => Some(text.clone()),
                other => Some(other.to_string()),
            });

            let primary = cells.next().flatten();
            let secondary = cells.next().flatten();
            let comment = cells.next().flatten();

            if primary.is_none() && secondary.is_none() && comment.is_none() {
                continue;
            }

            let mut secondary = secondary.unwrap_or_else(|| MISSING_SECONDARY.to_string());
            if let Some(comment) = comment {
                secondary = format!("{}\\{}", secondary, comment);
            }

            records.push(BilingualRecord {
                primary: primary.unwrap_or_default(),
                secondary,
            });
        }

        Ok(BilingualTable { records })
    }

    /// Write the table in the format selected by the destination extension
    pub fn write(&self, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "txt" => FileManager::write_to_file(path, &self.to_flat_text()),
            "xlsx" => self.write_workbook(path),
            other => Err(SubtitleError::UnsupportedFormat(other.to_string()).into()),
        }
    }

    /// Render the flat two-line format: secondary line, primary line, blank
    /// line, for every record in table order
    pub fn to_flat_text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.secondary);
            out.push('\n');
            out.push_str(&record.primary);
            out.push_str("\n\n");
        }
        out
    }

    /// Write a three-column sheet: primary, secondary, comment.
    ///
    /// The secondary cell splits off its comment at the first backslash and
    /// the `#` sentinel leaves the cell empty, inverting the folding done by
    /// [`BilingualTable::from_workbook`].
    pub fn write_workbook(&self, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        for (index, record) in self.records.iter().enumerate() {
            let row = index as u32;
            if !record.primary.is_empty() {
                sheet.write_string(row, 0, &record.primary)?;
            }

            let (secondary, comment) = record.secondary_parts();
            if !secondary.is_empty() && secondary != MISSING_SECONDARY {
                sheet.write_string(row, 1, secondary)?;
            }
            if let Some(comment) = comment {
                if !comment.is_empty() {
                    sheet.write_string(row, 2, comment)?;
                }
            }
        }

        workbook
            .save(path)
            .with_context(|| format!("Failed to write workbook: {}", path.display()))?;
        Ok(())
    }

    /// The records in table order
    pub fn records(&self) -> &[BilingualRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Timing map of one channel, later captions winning on key collision
fn timing_map(track: &CaptionTrack) -> HashMap<(Timecode, Timecode), String> {
    let mut map = HashMap::new();
    for caption in track.iter() {
        map.insert(caption.key(), caption.text().to_string());
    }
    map
}

/// Union both channels' timing keys, sort by start (end breaks ties), and
/// pair the channel texts per key, stripping override blocks
fn aligned_records(
    primary: HashMap<(Timecode, Timecode), String>,
    secondary: HashMap<(Timecode, Timecode), String>,
) -> Vec<BilingualRecord> {
    let mut keys: Vec<(Timecode, Timecode)> =
        primary.keys().chain(secondary.keys()).copied().collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .map(|key| BilingualRecord {
            primary: primary
                .get(&key)
                .map(|text| strip_override_tags(text))
                .unwrap_or_default(),
            secondary: secondary
                .get(&key)
                .map(|text| strip_override_tags(text))
                .unwrap_or_default(),
        })
        .collect()
}
