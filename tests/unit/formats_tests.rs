/*!
 * Tests for subtitle format detection and the per-format parsers
 */

use std::path::Path;

use subweave::errors::SubtitleError;
use subweave::formats::ass::{AssDocument, Channel, classify_style, strip_override_tags};
use subweave::formats::{Subtitle, SubtitleFormat, srt, vtt};
use subweave::timecode::Timecode;

use crate::common;

/// Test extension strings resolve to formats case-insensitively
#[test]
fn test_format_from_extension_withKnownExtensions_shouldResolve() {
    assert_eq!(SubtitleFormat::from_extension("ass").unwrap(), SubtitleFormat::Ass);
    assert_eq!(SubtitleFormat::from_extension("SRT").unwrap(), SubtitleFormat::Srt);
    assert_eq!(SubtitleFormat::from_extension(".vtt").unwrap(), SubtitleFormat::Vtt);
}

/// Test an unknown extension is reported, not guessed around
#[test]
fn test_format_from_extension_withUnknownExtension_shouldFail() {
    let result = SubtitleFormat::from_extension("docx");
    assert!(matches!(
        result,
        Err(SubtitleError::UnsupportedFormat(ref ext)) if ext == "docx"
    ));
}

/// Test format detection reads the path extension only
#[test]
fn test_format_from_path_withUppercaseExtension_shouldResolve() {
    let format = SubtitleFormat::from_path(Path::new("/media/Movie.SRT")).unwrap();
    assert_eq!(format, SubtitleFormat::Srt);
    assert_eq!(format.extension(), "srt");
}

/// Test a path without any extension is rejected
#[test]
fn test_format_from_path_withNoExtension_shouldFail() {
    assert!(SubtitleFormat::from_path(Path::new("/media/Movie")).is_err());
}

/// Test reading a file with an unsupported extension fails before any parsing
#[test]
fn test_subtitle_from_path_withUnknownExtension_shouldFail() {
    let error = Subtitle::from_path(Path::new("notes.docx")).unwrap_err();
    let subtitle_error = error.downcast_ref::<SubtitleError>();
    assert!(matches!(
        subtitle_error,
        Some(SubtitleError::UnsupportedFormat(ext)) if ext == "docx"
    ));
}

/// Test the parsed subtitle remembers its source format
#[test]
fn test_subtitle_parse_withSrtContent_shouldTagFormat() {
    let subtitle = Subtitle::parse(SubtitleFormat::Srt, "");
    assert_eq!(subtitle.format(), SubtitleFormat::Srt);
}

/// Test SubRip parsing drops identifier lines and keeps cue timing and text
#[test]
fn test_srt_parse_withPlainCues_shouldParseTimingAndText() {
    let content = r#"1
00:00:01,000 --> 00:00:02,500
First line

2
00:00:04,000 --> 00:00:05,000
Second line
"#;

    let track = srt::parse(content);

    assert_eq!(track.len(), 2);
    let first = &track.captions()[0];
    assert_eq!(first.start(), Timecode::from_millis(1_000));
    assert_eq!(first.end(), Timecode::from_millis(2_500));
    assert_eq!(first.text(), "First line");
}

/// Test the duplicate merge runs as part of SubRip parsing
#[test]
fn test_srt_parse_withDuplicateRun_shouldCollapseContiguousCues() {
    let content = r#"1
00:00:01,000 --> 00:00:02,000
Hello

2
00:00:02,000 --> 00:00:03,000
Hello

3
00:00:05,000 --> 00:00:06,000
Hello
"#;

    let track = srt::parse(content);

    assert_eq!(track.len(), 2);
    assert_eq!(track.captions()[0].start(), Timecode::from_millis(1_000));
    assert_eq!(track.captions()[0].end(), Timecode::from_millis(3_000));
    assert_eq!(track.captions()[1].start(), Timecode::from_millis(5_000));
}

/// Test soft-wrapped cue lines are flattened with an ideographic space
#[test]
fn test_srt_parse_withMultilineCue_shouldJoinWithWideSpace() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n<i>Hi</i>\nthere\n";

    let track = srt::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].text(), "<i>Hi</i>　there");
}

/// Test a cue whose lines all open with the same parenthesis joins as a
/// speaker list, markup ignored for the decision only
#[test]
fn test_srt_parse_withParentheticalLines_shouldJoinWithDashSeparator() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n(Alice)\n(Bob)\n";
    let track = srt::parse(content);
    assert_eq!(track.captions()[0].text(), "(Alice)　-(Bob)");

    let content = "1\n00:00:01,000 --> 00:00:02,000\n（歓声）\n（拍手）\n";
    let track = srt::parse(content);
    assert_eq!(track.captions()[0].text(), "（歓声）　-（拍手）");

    // Mixed openers fall back to the plain join
    let content = "1\n00:00:01,000 --> 00:00:02,000\n(Alice)\nplain\n";
    let track = srt::parse(content);
    assert_eq!(track.captions()[0].text(), "(Alice)　plain");
}

/// Test a single-line cue passes through byte-identical
#[test]
fn test_srt_parse_withSingleLineCue_shouldNotTouchText() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n<i>kept as-is</i>\n";
    let track = srt::parse(content);
    assert_eq!(track.captions()[0].text(), "<i>kept as-is</i>");
}

/// Test a cue with an unparseable timestamp is dropped, not fatal
#[test]
fn test_srt_parse_withMalformedTimestamp_shouldDropThatCue() {
    common::init_test_logging();
    let content = r#"1
00:00:01 --> 00:00:02,000
Broken timing

2
00:00:04,000 --> 00:00:05,000
Good cue
"#;

    let track = srt::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].text(), "Good cue");
}

/// Test a block with timing but no text lines is skipped
#[test]
fn test_srt_parse_withEmptyCueText_shouldSkipBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nKept\n";
    let track = srt::parse(content);
    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].text(), "Kept");
}

/// Test carriage returns from Windows-encoded files are tolerated
#[test]
fn test_srt_parse_withCrlfLineEndings_shouldParse() {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nWindows line\r\n";
    let track = srt::parse(content);
    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].text(), "Windows line");
}

/// Test empty content yields an empty track
#[test]
fn test_srt_parse_withEmptyContent_shouldYieldEmptyTrack() {
    assert!(srt::parse("").is_empty());
}

/// Test WebVTT parsing skips the header block and tolerates cue settings
#[test]
fn test_vtt_parse_withHeaderAndCueSettings_shouldParse() {
    let content = r#"WEBVTT

intro
00:00:01.000 --> 00:00:02.500 position:50% line:80%
Hello vtt
"#;

    let track = vtt::parse(content);

    assert_eq!(track.len(), 1);
    let caption = &track.captions()[0];
    assert_eq!(caption.start(), Timecode::from_millis(1_000));
    assert_eq!(caption.end(), Timecode::from_millis(2_500));
    assert_eq!(caption.text(), "Hello vtt");
}

/// Test NOTE blocks carry no timing line and are skipped
#[test]
fn test_vtt_parse_withNoteBlock_shouldSkipIt() {
    let content = r#"WEBVTT

NOTE
This comment is not a cue.

00:00:01.000 --> 00:00:02.000
Real cue
"#;

    let track = vtt::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].text(), "Real cue");
}

/// Test the duplicate merge also runs for WebVTT input
#[test]
fn test_vtt_parse_withDuplicateRun_shouldCollapse() {
    let content = r#"WEBVTT

00:00:01.000 --> 00:00:02.000
Same text

00:00:02.000 --> 00:00:03.000
Same text
"#;

    let track = vtt::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.captions()[0].end(), Timecode::from_millis(3_000));
}

/// Test override blocks are removed while other text is kept
#[test]
fn test_strip_override_tags_withEmbeddedBlocks_shouldRemoveThem() {
    assert_eq!(strip_override_tags(r"{\pos(12,40)}Hi{\i0}"), "Hi");
    assert_eq!(strip_override_tags("no tags"), "no tags");
}

/// Test the style naming convention maps to language channels
#[test]
fn test_classify_style_withConventionNames_shouldPickChannel() {
    assert_eq!(classify_style("Text - JP"), Some(Channel::Primary));
    assert_eq!(classify_style("cn-bottom"), Some(Channel::Secondary));
    assert_eq!(classify_style("Sign"), None);

    // A name carrying both tokens counts as primary, first match wins
    assert_eq!(classify_style("jpcn"), Some(Channel::Primary));
}

/// Test .ass parsing discovers the declared style names in order
#[test]
fn test_ass_parse_withStyleSection_shouldListDeclaredStyles() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    assert_eq!(document.styles(), &["Text - JP".to_string(), "Text - CN".to_string()]);
}

/// Test parsing content without the expected sections yields an empty document
#[test]
fn test_ass_parse_withMissingSections_shouldYieldEmptyDocument() {
    let document = AssDocument::parse("[Script Info]\nTitle: nothing else\n");
    assert!(document.styles().is_empty());
}

/// Test selection routes events to their style's bucket and counts channels
#[test]
fn test_ass_select_withBothStyles_shouldBeBilingual() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection = document.select(&["Text - JP".to_string(), "Text - CN".to_string()]);

    assert!(selection.is_bilingual());
    assert_eq!(selection.channel_counts(), (1, 1));
    assert_eq!(selection.bucket("Text - JP").unwrap().len(), 2);
    assert_eq!(selection.bucket("Text - CN").unwrap().len(), 2);
}

/// Test selecting a single channel is not bilingual
#[test]
fn test_ass_select_withSingleStyle_shouldNotBeBilingual() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection = document.select(&["Text - JP".to_string()]);

    assert!(!selection.is_bilingual());
    assert_eq!(selection.channel_counts(), (1, 0));
    assert!(selection.bucket("Text - CN").is_none());
}

/// Test duplicate names in the selection collapse to one
#[test]
fn test_ass_select_withDuplicatePick_shouldCollapseToFirst() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection =
        document.select(&["Text - JP".to_string(), "Text - JP".to_string()]);

    assert_eq!(selection.styles(), &["Text - JP".to_string()]);
    assert_eq!(selection.flatten().len(), 2);
}

/// Test a selected style the document never uses produces an empty bucket
#[test]
fn test_ass_select_withUnusedStyle_shouldProduceEmptyBucket() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection = document.select(&["Ghost".to_string()]);

    assert!(selection.bucket("Ghost").unwrap().is_empty());
    assert!(!selection.is_bilingual());
}

/// Test the free-text field of an event keeps its embedded commas
#[test]
fn test_ass_select_withCommasInText_shouldKeepFullText() {
    let content = "[V4+ Styles]\nFormat: Name, Fontname\nStyle: JP Main,Font\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,0:00:02.00,JP Main,,0,0,0,,Wait, wait, wait\n";

    let document = AssDocument::parse(content);
    let selection = document.select(&["JP Main".to_string()]);

    let bucket = selection.bucket("JP Main").unwrap();
    assert_eq!(bucket.captions()[0].text(), "Wait, wait, wait");
}

/// Test malformed event lines are skipped without poisoning the selection
#[test]
fn test_ass_select_withMalformedEventLine_shouldSkipIt() {
    common::init_test_logging();
    let content = "[V4+ Styles]\nFormat: Name, Fontname\nStyle: JP Main,Font\n\n[Events]\nFormat: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\nDialogue: 0,0:00:01.00,JP Main,too few fields\nDialogue: 0,0:00:01.00,0:00:02.00,JP Main,,0,0,0,,Good event\n";

    let document = AssDocument::parse(content);
    let selection = document.select(&["JP Main".to_string()]);

    let bucket = selection.bucket("JP Main").unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket.captions()[0].text(), "Good event");
}

/// Test flattening a monolingual selection strips override blocks and allows
/// plain-text extraction
#[test]
fn test_flatten_withMonolingualSelection_shouldStripOverridesAndExtract() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection = document.select(&["Text - JP".to_string()]);

    let mut track = selection.flatten();
    track.sort_by_start();

    assert!(!track.is_bilingual());
    assert_eq!(track.extract_text().unwrap(), "こんにちは、世界\nまた明日");
}

/// Test flattening a bilingual selection refuses plain-text extraction
#[test]
fn test_flatten_withBilingualSelection_shouldRefuseTextExtraction() {
    let document = AssDocument::parse(common::bilingual_ass_content());
    let selection = document.select(&["Text - JP".to_string(), "Text - CN".to_string()]);

    let track = selection.flatten();

    assert!(track.is_bilingual());
    assert!(matches!(
        track.extract_text(),
        Err(SubtitleError::BilingualTrack)
    ));
}
