/*!
 * # subweave - subtitle normalization and bilingual alignment
 *
 * A Rust library for converting subtitle files between formats, repairing
 * caption artifacts, and weaving dual-language tracks into bilingual tables.
 *
 * ## Features
 *
 * - Parse SubStation Alpha (.ass), SubRip (.srt) and WebVTT (.vtt) files
 * - Collapse duplicated caption runs produced by broadcast-style exports
 * - Flatten soft-wrapped multi-line cues into single display lines
 * - Classify .ass style selections as mono- or bilingual by style naming
 * - Align two language channels into timing-keyed bilingual record pairs
 * - Export plain text, flat bilingual text, and tabular spreadsheets
 * - Apply a user-maintained substitution rule table on plain-text export
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Millisecond time-codes and timestamp parsing
 * - `caption`: Caption entries and ordered caption tracks
 * - `formats`: Per-container parsers and format dispatch:
 *   - `formats::ass`: SubStation Alpha documents and style selection
 *   - `formats::srt`: SubRip parsing
 *   - `formats::vtt`: WebVTT parsing
 * - `dedup`: Collapsing of duplicated caption runs
 * - `bilingual`: Bilingual alignment and table load/export
 * - `textprocessor`: Substitution rule table loading and application
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod caption;
pub mod dedup;
pub mod formats;
pub mod bilingual;
pub mod textprocessor;
pub mod timecode;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use bilingual::{BilingualRecord, BilingualTable};
pub use caption::{Caption, CaptionTrack};
pub use errors::{AppError, RuleError, SubtitleError};
pub use formats::{Subtitle, SubtitleFormat};
pub use timecode::Timecode;
