use crate::error::{DescriptionError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Output language of a description document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Japanese,
}

impl Language {
    /// Short code used in output file names
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "jp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whether a session is the weekly event or a regular sparring session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Weekly,
    Regular,
}

impl SessionKind {
    pub fn for_date(date: NaiveDate, weekly_weekday: Weekday) -> Self {
        if date.weekday() == weekly_weekday {
            SessionKind::Weekly
        } else {
            SessionKind::Regular
        }
    }
}

/// The four comment templates, one per (session kind, language)
///
/// File order is en-weekly, jp-weekly, en-regular, jp-regular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTemplates {
    slots: [String; 4],
}

impl CommentTemplates {
    pub const REQUIRED_LINES: usize = 4;

    /// Load templates from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DescriptionError::MissingInput(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let templates = Self::parse(&content)?;
        info!("💬 Loaded comment templates from: {}", path.display());
        Ok(templates)
    }

    /// Parse template content; blank lines are ignored, escapes expanded
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(expand_escapes)
            .collect();

        let found = lines.len();
        let slots: [String; 4] = lines
            .into_iter()
            .take(Self::REQUIRED_LINES)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                DescriptionError::Template(format!(
                    "expected {} comment lines, found {}",
                    Self::REQUIRED_LINES,
                    found
                ))
            })?;

        Ok(Self { slots })
    }

    /// Positional slot for a session kind and language
    pub fn index(kind: SessionKind, language: Language) -> usize {
        let base = match kind {
            SessionKind::Weekly => 0,
            SessionKind::Regular => 2,
        };
        match language {
            Language::English => base,
            Language::Japanese => base + 1,
        }
    }

    pub fn select(&self, kind: SessionKind, language: Language) -> &str {
        &self.slots[Self::index(kind, language)]
    }
}

/// Expand literal `\n` and `@n` markers into real newlines
pub fn expand_escapes(line: &str) -> String {
    line.replace("\\n", "\n").replace("@n", "\n")
}
