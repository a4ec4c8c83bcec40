/*!
 * Sequential text substitution driven by a user-maintained rule table.
 *
 * A rule table is an ordered list of (enabled, pattern, replacement)
 * triples; the single-language export path applies every enabled rule to
 * the full extracted text, in table order. The storage format belongs to
 * the user; this module ships the reference loader for the historical
 * `flag,pattern,replacement` line format.
 */

use std::path::Path;

use anyhow::Result;
use log::warn;
use regex::{Regex, RegexBuilder};

use crate::errors::RuleError;
use crate::file_utils::FileManager;

/// One substitution rule
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    /// Disabled rules stay in the table but are not applied
    pub enabled: bool,
    /// Pattern, compiled in multi-line mode
    pub pattern: Regex,
    /// Replacement text; capture groups are referenced as `$1`, `$2`, ...
    pub replacement: String,
}

/// Load a rule table from a file in the reference line format
pub fn load_rules(path: &Path) -> Result<Vec<SubstitutionRule>> {
    let content = FileManager::read_to_string(path)?;
    Ok(parse_rules(&content))
}

/// Parse rule lines that are already in memory.
///
/// One rule per line: `flag,pattern,replacement`, no header, cells past the
/// third ignored, `flag != 0` enabling the rule. A leading byte-order mark
/// and blank lines are tolerated. Lines that do not fit the shape are
/// skipped with a warning so one bad rule never takes down the whole table.
pub fn parse_rules(content: &str) -> Vec<SubstitutionRule> {
    let mut rules = Vec::new();

    for (index, line) in content.trim_start_matches('\u{feff}').lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_rule_line(index + 1, line) {
            Ok(rule) => rules.push(rule),
            Err(e) => warn!("Skipping rule: {}", e),
        }
    }

    rules
}

fn parse_rule_line(number: usize, line: &str) -> Result<SubstitutionRule, RuleError> {
    let cells: Vec<&str> = line.split(',').collect();
    if cells.len() < 3 {
        return Err(RuleError::MalformedRule {
            line: number,
            content: line.to_string(),
        });
    }

    let flag: i64 = cells[0]
        .trim()
        .parse()
        .map_err(|_| RuleError::MalformedRule {
            line: number,
            content: line.to_string(),
        })?;

    let pattern = RegexBuilder::new(cells[1])
        .multi_line(true)
        .build()
        .map_err(|e| RuleError::InvalidPattern {
            pattern: cells[1].to_string(),
            reason: e.to_string(),
        })?;

    Ok(SubstitutionRule {
        enabled: flag != 0,
        pattern,
        replacement: cells[2].to_string(),
    })
}

/// Apply every enabled rule to the text, in table order
pub fn apply_rules(text: &str, rules: &[SubstitutionRule]) -> String {
    let mut output = text.to_string();
    for rule in rules.iter().filter(|rule| rule.enabled) {
        output = rule
            .pattern
            .replace_all(&output, rule.replacement.as_str())
            .into_owned();
    }
    output
}
