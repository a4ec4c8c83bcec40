use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::formats::SubtitleFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Default output path next to the input, same stem
    // @params: input_file, extension
    pub fn default_output_path<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        input_file.as_ref().with_extension(extension)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Classify a path by its extension alone; file content never
    /// participates in the decision
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let extension = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if let Ok(format) = SubtitleFormat::from_extension(&extension) {
            return FileType::Subtitle(format);
        }

        match extension.as_str() {
            "txt" => FileType::FlatTable,
            "xlsx" => FileType::Workbook,
            _ => FileType::Unknown,
        }
    }
}

/// Enum representing the recognized input file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Subtitle file in one of the supported containers
    Subtitle(SubtitleFormat),
    /// Flat two-line-per-record bilingual text
    FlatTable,
    /// Tabular spreadsheet workbook
    Workbook,
    /// Unknown file type
    Unknown,
}
