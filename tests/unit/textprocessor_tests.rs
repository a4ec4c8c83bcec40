/*!
 * Tests for the substitution rule table
 */

use anyhow::Result;

use subweave::textprocessor::{apply_rules, load_rules, parse_rules};

use crate::common;

/// Test well-formed rule lines load with their flag, pattern, and replacement
#[test]
fn test_parse_rules_withValidLines_shouldLoadAll() {
    let rules = parse_rules("1,foo,bar\n0,baz,qux\n");

    assert_eq!(rules.len(), 2);
    assert!(rules[0].enabled);
    assert_eq!(rules[0].pattern.as_str(), "foo");
    assert_eq!(rules[0].replacement, "bar");
    assert!(!rules[1].enabled);
}

/// Test a leading byte-order mark does not corrupt the first rule
#[test]
fn test_parse_rules_withByteOrderMark_shouldParseFirstLine() {
    let rules = parse_rules("\u{feff}1,a,b\n");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].pattern.as_str(), "a");
}

/// Test blank lines are skipped without complaint
#[test]
fn test_parse_rules_withBlankLines_shouldSkipThem() {
    let rules = parse_rules("1,a,b\n\n   \n1,c,d\n");
    assert_eq!(rules.len(), 2);
}

/// Test lines that do not fit the shape are skipped, not fatal
#[test]
fn test_parse_rules_withMalformedLines_shouldSkipThem() {
    common::init_test_logging();
    let rules = parse_rules("not a rule\n1,ok,fine\nx,a,b\n");

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].pattern.as_str(), "ok");
}

/// Test a rule with an invalid pattern is skipped while the rest load
#[test]
fn test_parse_rules_withInvalidPattern_shouldSkipThatRule() {
    common::init_test_logging();
    let rules = parse_rules("1,[,broken\n1,good,fixed\n");

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].pattern.as_str(), "good");
}

/// Test cells past the third are ignored
#[test]
fn test_parse_rules_withExtraCells_shouldIgnoreThem() {
    let rules = parse_rules("1,a,b,c,d\n");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].replacement, "b");
}

/// Test any non-zero flag enables a rule
#[test]
fn test_parse_rules_withNonZeroFlag_shouldEnable() {
    let rules = parse_rules("2,a,b\n-1,c,d\n0,e,f\n");
    assert!(rules[0].enabled);
    assert!(rules[1].enabled);
    assert!(!rules[2].enabled);
}

/// Test rules apply in table order, each seeing the previous rule's output
#[test]
fn test_apply_rules_withSequentialRules_shouldChainInOrder() {
    let rules = parse_rules("1,a,b\n1,b,c\n");
    assert_eq!(apply_rules("a", &rules), "c");
}

/// Test disabled rules stay in the table but never fire
#[test]
fn test_apply_rules_withDisabledRule_shouldSkipIt() {
    let rules = parse_rules("0,a,X\n");
    assert_eq!(apply_rules("a", &rules), "a");
}

/// Test patterns compile in multi-line mode so anchors match every line
#[test]
fn test_apply_rules_withLineAnchor_shouldMatchEveryLine() {
    let rules = parse_rules("1,^- ,\n");
    assert_eq!(apply_rules("- first\n- second", &rules), "first\nsecond");
}

/// Test capture groups are available in the replacement
#[test]
fn test_apply_rules_withCaptureGroups_shouldSubstituteThem() {
    let rules = parse_rules(r"1,(\d+)s,$1 seconds");
    assert_eq!(apply_rules("wait 10s", &rules), "wait 10 seconds");
}

/// Test applying an empty table is the identity
#[test]
fn test_apply_rules_withNoRules_shouldReturnInputUnchanged() {
    assert_eq!(apply_rules("untouched", &[]), "untouched");
}

/// Test loading a rule table from a file
#[test]
fn test_load_rules_withRuleFile_shouldLoad() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let rules_path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "rules.txt",
        "1,<.*?>,\n0,unused,x\n",
    )?;

    let rules = load_rules(&rules_path)?;

    assert_eq!(rules.len(), 2);
    assert_eq!(apply_rules("<i>Hi</i>", &rules), "Hi");
    Ok(())
}

/// Test loading from a missing file reports the path
#[test]
fn test_load_rules_withMissingFile_shouldFail() {
    let result = load_rules(std::path::Path::new("/no/such/rules.txt"));
    assert!(result.is_err());
}
