use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::description::{CommentTemplates, DescriptionComposer, Language};
use crate::error::{DescriptionError, Result};
use crate::names::NameNormalizer;
use crate::results::{session_date_from_path, ParsedResults, ResultParser};
use crate::transcript::{TimestampTranscriber, TranscriptionSummary};

/// How the documents were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Result file listed matches: names substituted, both languages written
    Automatic,
    /// No matches in the result file: English body only, placeholders kept
    Manual,
}

/// One composed output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionDocument {
    pub language: Language,
    pub path: PathBuf,
    pub content: String,
}

/// Outcome of one generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub session_date: NaiveDate,
    pub mode: GenerationMode,
    pub documents: Vec<DescriptionDocument>,
    pub participants: Vec<String>,
    pub summary: TranscriptionSummary,
    pub processing_time: Duration,
}

/// Runs the whole pipeline for one recorded session
pub struct DescriptionGenerator {
    config: Config,
}

impl DescriptionGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compose every document in memory without touching the output directory
    pub fn generate(&self, result_path: &Path, timestamp_path: &Path) -> Result<GenerationResult> {
        let start_time = Instant::now();

        // The date gates everything else, so a bad file name fails before any parsing
        let session_date = session_date_from_path(result_path)?;
        info!("📅 Session date: {}", session_date);

        let result_lines = read_lines(result_path)?;
        let timestamp_lines = TimestampTranscriber::read_log(timestamp_path)?;
        let transcriber = TimestampTranscriber::new()?;

        let plain = NameNormalizer::new();
        let has_matches = {
            let probe = ResultParser::new(&plain)?;
            result_lines.iter().any(|line| probe.parse_line(line.trim()).is_some())
        };

        let result = if has_matches {
            self.generate_automatic(session_date, &result_lines, &timestamp_lines, &transcriber)?
        } else {
            info!("✍️ No match results found, running in manual mode (placeholders kept)");
            self.generate_manual(session_date, &timestamp_lines, &transcriber)
        };

        Ok(GenerationResult {
            processing_time: start_time.elapsed(),
            ..result
        })
    }

    fn generate_automatic(
        &self,
        session_date: NaiveDate,
        result_lines: &[String],
        timestamp_lines: &[String],
        transcriber: &TimestampTranscriber,
    ) -> Result<GenerationResult> {
        let names = NameNormalizer::from_file(&self.config.inputs.replace_info_file)?;
        let templates = CommentTemplates::from_file(&self.config.inputs.comment_file)?;

        let ParsedResults {
            matches,
            participants,
            display_names,
        } = ResultParser::new(&names)?.parse(result_lines);
        info!("🏆 {} matches, {} participants", matches.len(), participants.len());

        let (lines, summary) = transcriber.transcribe_with_summary(timestamp_lines, &matches);
        info!("⏱️ Transcribed timestamps: {}", summary);

        let composer = DescriptionComposer::new(&self.config.titles);
        let documents = [
            (Language::English, &participants),
            (Language::Japanese, &display_names),
        ]
        .into_iter()
        .map(|(language, shown_names)| DescriptionDocument {
            language,
            path: self.config.output_path(session_date, language),
            content: composer.compose_document(session_date, language, &templates, shown_names, &lines),
        })
        .collect();

        Ok(GenerationResult {
            session_date,
            mode: GenerationMode::Automatic,
            documents,
            participants,
            summary,
            processing_time: Duration::ZERO,
        })
    }

    fn generate_manual(
        &self,
        session_date: NaiveDate,
        timestamp_lines: &[String],
        transcriber: &TimestampTranscriber,
    ) -> GenerationResult {
        let (lines, summary) = transcriber.transcribe_with_summary(timestamp_lines, &Default::default());
        let composer = DescriptionComposer::new(&self.config.titles);

        let document = DescriptionDocument {
            language: Language::English,
            path: self.config.output_path(session_date, Language::English),
            content: composer.compose_body(&lines),
        };

        GenerationResult {
            session_date,
            mode: GenerationMode::Manual,
            documents: vec![document],
            participants: Vec::new(),
            summary,
            processing_time: Duration::ZERO,
        }
    }

    /// Write every composed document to disk
    ///
    /// Documents are staged next to their targets and renamed into place; if
    /// any step fails, staged files and already-renamed documents are removed.
    pub fn write(&self, result: &GenerationResult) -> Result<()> {
        std::fs::create_dir_all(&self.config.output.dir)?;

        let staged: Vec<(PathBuf, &DescriptionDocument)> = result
            .documents
            .iter()
            .map(|document| (staging_path(&document.path), document))
            .collect();

        if let Err(e) = staged
            .iter()
            .try_for_each(|(tmp, document)| std::fs::write(tmp, &document.content))
        {
            discard(staged.iter().map(|(tmp, _)| tmp.as_path()));
            return Err(e.into());
        }

        for (i, (tmp, document)) in staged.iter().enumerate() {
            if let Err(e) = std::fs::rename(tmp, &document.path) {
                warn!("Failed to write {}, rolling back: {}", document.path.display(), e);
                discard(staged[..i].iter().map(|(_, d)| d.path.as_path()));
                discard(staged[i..].iter().map(|(tmp, _)| tmp.as_path()));
                return Err(e.into());
            }
            info!("💾 Wrote {} description: {}", document.language, document.path.display());
        }

        Ok(())
    }

    /// Generate and write in one step
    pub fn run(&self, result_path: &Path, timestamp_path: &Path) -> Result<GenerationResult> {
        let result = self.generate(result_path, timestamp_path)?;
        self.write(&result)?;
        debug!("Generation finished in {:.3}s", result.processing_time.as_secs_f64());
        Ok(result)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_os_string();
    staged.push(".tmp");
    PathBuf::from(staged)
}

fn discard<'a>(paths: impl Iterator<Item = &'a Path>) {
    for path in paths {
        let _ = std::fs::remove_file(path);
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(DescriptionError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(String::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_bad_date_prefix_fails_before_reading_inputs() {
        let generator = DescriptionGenerator::new(Config::default());
        let result = generator.generate(Path::new("/nowhere/result.txt"), Path::new("/nowhere/ts.txt"));

        assert!(matches!(result, Err(DescriptionError::Format(_))));
    }

    #[test]
    fn test_missing_timestamp_log() {
        let temp_dir = TempDir::new().unwrap();
        let result_path = temp_dir.path().join("20240302_result.txt");
        std::fs::write(&result_path, "M01: Alice vs Bob\n").unwrap();

        let generator = DescriptionGenerator::new(Config::default());
        let result = generator.generate(&result_path, &temp_dir.path().join("missing.txt"));

        assert!(matches!(result, Err(DescriptionError::MissingInput(_))));
    }

    #[test]
    fn test_manual_mode_needs_no_static_files() {
        let temp_dir = TempDir::new().unwrap();
        let result_path = temp_dir.path().join("20240305_result.txt");
        let timestamp_path = temp_dir.path().join("timestamps.txt");
        std::fs::write(&result_path, "free text only\n").unwrap();
        std::fs::write(&timestamp_path, "0:00:10 M01: Player1 - X vs Player2 - Y\n").unwrap();

        let config = ConfigBuilder::new()
            .with_replace_info_file(temp_dir.path().join("absent.txt"))
            .with_comment_file(temp_dir.path().join("absent_comments.txt"))
            .with_output_dir(temp_dir.path().to_path_buf())
            .build();
        let result = DescriptionGenerator::new(config).generate(&result_path, &timestamp_path).unwrap();

        assert_eq!(result.mode, GenerationMode::Manual);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(
            result.documents[0].content,
            "0:00:10 M01: Player1 - X vs Player2 - Y\n\n#hellishquart\n"
        );
    }

    #[test]
    fn test_failed_write_leaves_no_partial_output() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .with_output_dir(temp_dir.path().to_path_buf())
            .build();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let en_path = config.output_path(date, Language::English);
        let jp_path = config.output_path(date, Language::Japanese);

        // A directory in place of the Japanese file makes its rename fail
        std::fs::create_dir_all(jp_path.join("occupied")).unwrap();

        let result = GenerationResult {
            session_date: date,
            mode: GenerationMode::Automatic,
            documents: vec![
                DescriptionDocument {
                    language: Language::English,
                    path: en_path.clone(),
                    content: "english\n".to_string(),
                },
                DescriptionDocument {
                    language: Language::Japanese,
                    path: jp_path.clone(),
                    content: "japanese\n".to_string(),
                },
            ],
            participants: Vec::new(),
            summary: TranscriptionSummary::default(),
            processing_time: Duration::ZERO,
        };

        let generator = DescriptionGenerator::new(config);
        assert!(generator.write(&result).is_err());

        assert!(!en_path.exists());
        assert!(!staging_path(&en_path).exists());
        assert!(!staging_path(&jp_path).exists());
        assert!(jp_path.is_dir());
    }
}
