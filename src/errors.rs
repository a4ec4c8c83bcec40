/*!
 * Error types for the subweave application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during subtitle parsing and processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when a file extension maps to no known format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error when a timestamp cannot be parsed
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Error when a dialogue event line has the wrong field count
    #[error("Malformed event line: {0}")]
    MalformedEventLine(String),

    /// Error when plain-text extraction is requested on a bilingual track
    #[error("Cannot extract plain text from a bilingual track; export it as a paired table instead")]
    BilingualTrack,

    /// Error when bilingual alignment is missing one of the language channels
    #[error("Bilingual alignment needs one channel of each language, found {jp} jp-style and {cn} cn-style")]
    MissingLanguageChannel {
        /// Number of selected styles classified as the primary (jp) channel
        jp: usize,
        /// Number of selected styles classified as the secondary (cn) channel
        cn: usize,
    },
}

/// Errors that can occur while loading or applying a substitution rule table
#[derive(Error, Debug)]
pub enum RuleError {
    /// Error when a rule line does not have the flag,pattern,replacement shape
    #[error("Malformed rule line {line}: {content}")]
    MalformedRule {
        /// One-based line number in the rule file
        line: usize,
        /// The offending line content
        content: String,
    },

    /// Error when a rule pattern is not a valid regular expression
    #[error("Invalid rule pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as written in the rule file
        pattern: String,
        /// Compiler diagnostic
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the substitution rule table
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
