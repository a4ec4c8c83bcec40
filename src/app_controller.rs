use anyhow::{Result, anyhow};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::bilingual::BilingualTable;
use crate::caption::CaptionTrack;
use crate::errors::SubtitleError;
use crate::file_utils::{FileManager, FileType};
use crate::formats::ass::AssDocument;
use crate::formats::{Subtitle, SubtitleFormat};
use crate::textprocessor::{self, SubstitutionRule};

// @module: Application controller for subtitle conversion

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Substitution rules applied on single-language export
    rules: Vec<SubstitutionRule>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let rules = if config.export.rules_file.is_empty() {
            Vec::new()
        } else {
            let rules = textprocessor::load_rules(Path::new(&config.export.rules_file))?;
            info!("Loaded {} substitution rules", rules.len());
            rules
        };

        Ok(Self { config, rules })
    }

    /// List the style names an .ass file declares
    pub fn list_styles(&self, input_file: &Path) -> Result<Vec<String>> {
        let format = SubtitleFormat::from_path(input_file)?;
        if format != SubtitleFormat::Ass {
            return Err(
                SubtitleError::UnsupportedFormat(format.extension().to_string()).into(),
            );
        }

        let content = FileManager::read_to_string(input_file)?;
        let document = AssDocument::parse(&content);
        Ok(document.styles().to_vec())
    }

    /// Run the conversion workflow for one input file.
    ///
    /// The pipeline is picked from the input extension: subtitle formats are
    /// parsed and exported as plain text or as a bilingual table, a flat
    /// bilingual text file converts to a workbook, and a workbook converts
    /// back to flat text. When no output file is named, the output lands
    /// next to the input with the pipeline's default extension. Returns the
    /// written path.
    pub fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        styles: &[String],
    ) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = match FileManager::detect_file_type(&input_file) {
            FileType::Subtitle(_) => {
                self.convert_subtitle(&input_file, output_file.as_deref(), styles)?
            }
            FileType::FlatTable => {
                let output =
                    Self::resolve_output(&input_file, output_file.as_deref(), &["xlsx"], "xlsx")?;
                let table = BilingualTable::load(&input_file)?;
                debug!("Loaded {} bilingual records", table.len());
                table.write(&output)?;
                output
            }
            FileType::Workbook => {
                let output =
                    Self::resolve_output(&input_file, output_file.as_deref(), &["txt"], "txt")?;
                let table = BilingualTable::load(&input_file)?;
                debug!("Loaded {} bilingual records", table.len());
                table.write(&output)?;
                output
            }
            FileType::Unknown => {
                let extension = input_file
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                return Err(SubtitleError::UnsupportedFormat(extension).into());
            }
        };

        info!("Success: {:?}", output_path);
        debug!("Completed in {} ms", start_time.elapsed().as_millis());
        Ok(output_path)
    }

    /// Convert one subtitle file through the pipeline its content calls for
    fn convert_subtitle(
        &self,
        input_file: &Path,
        output_file: Option<&Path>,
        styles: &[String],
    ) -> Result<PathBuf> {
        match Subtitle::from_path(input_file)? {
            Subtitle::Srt(track) | Subtitle::Vtt(track) => {
                debug!("Parsed {} captions", track.len());
                let output = Self::resolve_output(input_file, output_file, &["txt"], "txt")?;
                self.write_plain_text(&track, &output)?;
                Ok(output)
            }
            Subtitle::Ass(document) => {
                let picked: Vec<String> = if styles.is_empty() {
                    document.styles().to_vec()
                } else {
                    styles.to_vec()
                };
                debug!("Selecting styles: {:?}", picked);
                let selection = document.select(&picked);

                if selection.is_bilingual() {
                    let default_extension = self.config.export.bilingual_format.extension();
                    let output = Self::resolve_output(
                        input_file,
                        output_file,
                        &["txt", "xlsx"],
                        default_extension,
                    )?;
                    let table = BilingualTable::from_selection(&selection)?;
                    debug!("Aligned {} bilingual records", table.len());
                    table.write(&output)?;
                    Ok(output)
                } else {
                    let output = Self::resolve_output(input_file, output_file, &["txt"], "txt")?;
                    let mut track = selection.flatten();
                    track.sort_by_start();
                    self.write_plain_text(&track, &output)?;
                    Ok(output)
                }
            }
        }
    }

    /// Extract a track's text, run the rule table over it, write the result
    fn write_plain_text(&self, track: &CaptionTrack, output: &Path) -> Result<()> {
        let text = track.extract_text()?;
        let processed = textprocessor::apply_rules(&text, &self.rules);
        FileManager::write_to_file(output, &processed)
    }

    /// Pick the output path: a caller-named path must carry an extension the
    /// pipeline can produce, otherwise the default lands next to the input
    fn resolve_output(
        input_file: &Path,
        requested: Option<&Path>,
        allowed: &[&str],
        default_extension: &str,
    ) -> Result<PathBuf> {
        match requested {
            Some(path) => {
                let extension = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                if !allowed.contains(&extension.as_str()) {
                    return Err(SubtitleError::UnsupportedFormat(extension).into());
                }
                Ok(path.to_path_buf())
            }
            None => Ok(FileManager::default_output_path(input_file, default_extension)),
        }
    }
}
