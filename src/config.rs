use crate::description::{Language, SessionKind};
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the description generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Static input files (replacement table, comment templates)
    #[serde(default)]
    pub inputs: InputConfig,

    /// Output location and naming
    #[serde(default)]
    pub output: OutputConfig,

    /// Title and tag text
    #[serde(default)]
    pub titles: TitleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Replacement table (`local,canonical` per line)
    pub replace_info_file: PathBuf,

    /// Comment templates (en-weekly, jp-weekly, en-regular, jp-regular)
    pub comment_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the description files are written to
    pub dir: PathBuf,

    /// File name template, `{date}` and `{lang}` are substituted
    pub file_template: String,

    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Leading tag of every title
    pub bracket_tag: String,

    /// Weekday of the weekly event
    pub weekly_weekday: Weekday,

    pub en_weekly_suffix: String,
    pub en_regular_suffix: String,
    pub jp_weekly_suffix: String,
    pub jp_regular_suffix: String,

    /// Last line of every document
    pub trailing_tag: String,
}

impl TitleConfig {
    /// Title suffix for a session kind and language
    pub fn suffix(&self, kind: SessionKind, language: Language) -> &str {
        match (kind, language) {
            (SessionKind::Weekly, Language::English) => &self.en_weekly_suffix,
            (SessionKind::Regular, Language::English) => &self.en_regular_suffix,
            (SessionKind::Weekly, Language::Japanese) => &self.jp_weekly_suffix,
            (SessionKind::Regular, Language::Japanese) => &self.jp_regular_suffix,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            replace_info_file: PathBuf::from("replace_info.txt"),
            comment_file: PathBuf::from("youtube_comment.txt"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file_template: "{date}_description_{lang}.txt".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            bracket_tag: "[Hellish Quart PvP]".to_string(),
            weekly_weekday: Weekday::Sat,
            en_weekly_suffix: " Weekly Sparring".to_string(),
            en_regular_suffix: " Sparring".to_string(),
            jp_weekly_suffix: " 週例オンライン対戦会".to_string(),
            jp_regular_suffix: " 道場マッチ".to_string(),
            trailing_tag: "#hellishquart".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then the environment
    pub fn load() -> Result<Self> {
        let config_paths = ["hq-description.toml", "config/hq-description.toml"];

        for path in &config_paths {
            if Path::new(path).is_file() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config file {}: {:#}", path, e),
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from an explicit file, with environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env();

        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Default configuration with environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(output_dir) = std::env::var("HQ_DESCRIPTION_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(output_dir);
        }

        if let Ok(replace_info) = std::env::var("HQ_DESCRIPTION_REPLACE_INFO") {
            self.inputs.replace_info_file = PathBuf::from(replace_info);
        }

        if let Ok(comments) = std::env::var("HQ_DESCRIPTION_COMMENTS") {
            self.inputs.comment_file = PathBuf::from(comments);
        }

        if let Ok(log_level) = std::env::var("HQ_DESCRIPTION_LOG_LEVEL") {
            self.output.log_level = log_level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.titles.bracket_tag.trim().is_empty() {
            return Err(anyhow!("bracket_tag must not be empty"));
        }

        if self.titles.trailing_tag.trim().is_empty() {
            return Err(anyhow!("trailing_tag must not be empty"));
        }

        // Both languages would write to the same file otherwise
        if !self.output.file_template.contains("{lang}") {
            return Err(anyhow!("file_template must contain {{lang}}"));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Default tracing filter; `verbose` forces debug output for this crate
    pub fn log_filter(&self, verbose: bool) -> String {
        let level = if verbose { "debug" } else { self.output.log_level.trim() };
        format!("hq_description={},warn", level)
    }

    /// Output path for one language of a session
    pub fn output_path(&self, date: NaiveDate, language: Language) -> PathBuf {
        let filename = self
            .output
            .file_template
            .replace("{date}", &date.format("%Y%m%d").to_string())
            .replace("{lang}", language.code());
        self.output.dir.join(filename)
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Description Generator Configuration:\n\
            - Replacement Table: {}\n\
            - Comment Templates: {}\n\
            - Output Directory: {}\n\
            - Weekly Session Day: {}\n\
            - Title Tag: {}",
            self.inputs.replace_info_file.display(),
            self.inputs.comment_file.display(),
            self.output.dir.display(),
            self.titles.weekly_weekday,
            self.titles.bracket_tag
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_replace_info_file(mut self, path: PathBuf) -> Self {
        self.config.inputs.replace_info_file = path;
        self
    }

    pub fn with_comment_file(mut self, path: PathBuf) -> Self {
        self.config.inputs.comment_file = path;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.dir = dir;
        self
    }

    pub fn with_weekly_weekday(mut self, weekday: Weekday) -> Self {
        self.config.titles.weekly_weekday = weekday;
        self
    }

    pub fn with_trailing_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.titles.trailing_tag = tag.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.titles.weekly_weekday, Weekday::Sat);
        assert_eq!(config.titles.trailing_tag, "#hellishquart");
        assert_eq!(config.inputs.replace_info_file, PathBuf::from("replace_info.txt"));
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_output_dir(PathBuf::from("out"))
            .with_weekly_weekday(Weekday::Sun)
            .with_trailing_tag("#hq")
            .build();

        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.titles.weekly_weekday, Weekday::Sun);
        assert_eq!(config.titles.trailing_tag, "#hq");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.output.file_template = "{date}_description.txt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_from_env_drives_filter() {
        std::env::set_var("HQ_DESCRIPTION_LOG_LEVEL", "trace");
        let config = Config::from_env().unwrap();
        std::env::remove_var("HQ_DESCRIPTION_LOG_LEVEL");

        assert_eq!(config.output.log_level, "trace");
        assert_eq!(config.log_filter(false), "hq_description=trace,warn");
        assert_eq!(config.log_filter(true), "hq_description=debug,warn");
    }

    #[test]
    fn test_log_level_from_toml() {
        let config: Config = toml::from_str("[output]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.log_filter(false), "hq_description=debug,warn");
    }

    #[test]
    fn test_validate_does_not_create_output_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .with_output_dir(temp_dir.path().join("not_yet"))
            .build();

        assert!(config.validate().is_ok());
        assert!(!temp_dir.path().join("not_yet").exists());
    }

    #[test]
    fn test_output_path() {
        let config = ConfigBuilder::new().with_output_dir(PathBuf::from("out")).build();
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        assert_eq!(
            config.output_path(date, Language::Japanese),
            PathBuf::from("out").join("20240302_description_jp.txt")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            "[titles]\nweekly_weekday = \"Sun\"\n\n[output]\ndir = \"descriptions\"\n",
        )
        .unwrap();

        assert_eq!(config.titles.weekly_weekday, Weekday::Sun);
        assert_eq!(config.titles.bracket_tag, "[Hellish Quart PvP]");
        assert_eq!(config.output.dir, PathBuf::from("descriptions"));
        assert_eq!(config.output.file_template, "{date}_description_{lang}.txt");
    }

    #[test]
    fn test_suffix_selection() {
        let titles = TitleConfig::default();
        assert_eq!(titles.suffix(SessionKind::Weekly, Language::English), " Weekly Sparring");
        assert_eq!(titles.suffix(SessionKind::Regular, Language::Japanese), " 道場マッチ");
    }
}
