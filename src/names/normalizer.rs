use crate::error::{DescriptionError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// A single replacement-table row (local form -> canonical form)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Alternate display form, typically native script
    pub local: String,
    /// Romanized name used as the join key across files
    pub canonical: String,
}

impl NameEntry {
    pub fn new(local: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            canonical: canonical.into(),
        }
    }

    fn local_len(&self) -> usize {
        self.local.chars().count()
    }
}

/// Player name normalizer backed by the replacement table
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    /// Entries in table order
    entries: Vec<NameEntry>,

    /// Indices into `entries`, longest local form first
    by_length: Vec<usize>,

    /// Exact local -> canonical lookup for result-file tokens
    local_to_canonical: HashMap<String, String>,

    /// Alternation of every local form, ordered longest-first
    pattern: Option<Regex>,
}

impl NameNormalizer {
    /// Create a normalizer with an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the replacement table from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DescriptionError::MissingInput(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let normalizer = Self::parse_table(&content)?;
        info!("📚 Loaded {} name mappings from: {}", normalizer.len(), path.display());
        Ok(normalizer)
    }

    /// Parse replacement table content (`local,canonical` per line)
    pub fn parse_table(content: &str) -> Result<Self> {
        Self::load(content.lines())
    }

    /// Build the table from raw lines, skipping blanks, comments and malformed rows
    pub fn load<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();

        for line in lines {
            let line = line.as_ref().trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 2 {
                debug!("Skipping malformed replacement row: {}", line);
                continue;
            }

            let (local, canonical) = (fields[0].trim(), fields[1].trim());
            if local.is_empty() || canonical.is_empty() {
                warn!("Skipping replacement row with an empty field: {}", line);
                continue;
            }

            entries.push(NameEntry::new(local, canonical));
        }

        Self::from_entries(entries)
    }

    /// Build the table from already-parsed entries
    pub fn from_entries(entries: Vec<NameEntry>) -> Result<Self> {
        let entries: Vec<NameEntry> = entries
            .into_iter()
            .filter(|e| !e.local.is_empty() && !e.canonical.is_empty())
            .collect();

        let mut by_length: Vec<usize> = (0..entries.len()).collect();
        by_length.sort_by(|&a, &b| entries[b].local_len().cmp(&entries[a].local_len()));

        let mut local_to_canonical = HashMap::new();
        for entry in &entries {
            if local_to_canonical.contains_key(&entry.local) {
                warn!("Duplicate local name '{}', keeping the first mapping", entry.local);
                continue;
            }
            local_to_canonical.insert(entry.local.clone(), entry.canonical.clone());
        }

        let pattern = if entries.is_empty() {
            None
        } else {
            let alternation = by_length
                .iter()
                .map(|&i| regex::escape(&entries[i].local))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation)?)
        };

        Ok(Self {
            entries,
            by_length,
            local_to_canonical,
            pattern,
        })
    }

    /// Resolve a result-file token by exact local-form match
    ///
    /// Tokens without a mapping pass through unchanged. No substring
    /// matching happens here; see [`NameNormalizer::substitute`] for that.
    pub fn normalize<'a>(&'a self, raw: &'a str) -> &'a str {
        self.local_to_canonical
            .get(raw)
            .map(String::as_str)
            .unwrap_or(raw)
    }

    /// Replace every local form inside free text with its canonical form
    pub fn substitute(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        pattern
            .replace_all(text, |caps: &regex::Captures| {
                let local = &caps[0];
                self.local_to_canonical
                    .get(local)
                    .cloned()
                    .unwrap_or_else(|| local.to_string())
            })
            .into_owned()
    }

    /// Display form for a canonical name: `"{local} ({canonical})"` when aliased
    pub fn to_display_form(&self, canonical: &str) -> String {
        match self.entries.iter().find(|e| e.canonical == canonical) {
            Some(entry) => format!("{} ({})", entry.local, entry.canonical),
            None => canonical.to_string(),
        }
    }

    /// Entries ordered longest local form first
    pub fn mapping(&self) -> impl Iterator<Item = &NameEntry> {
        self.by_length.iter().map(move |&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(rows: &[(&str, &str)]) -> NameNormalizer {
        NameNormalizer::from_entries(rows.iter().map(|(l, c)| NameEntry::new(*l, *c)).collect()).unwrap()
    }

    #[test]
    fn test_load_skips_comments_blanks_and_malformed_rows() {
        let content = "# local,canonical\n\n山田,Yamada\nbroken row\na,b,c\n  佐藤 , Sato  \n,Empty\n";
        let names = NameNormalizer::parse_table(content).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names.normalize("山田"), "Yamada");
        assert_eq!(names.normalize("佐藤"), "Sato");
    }

    #[test]
    fn test_mapping_sorted_longest_first() {
        let names = normalizer(&[("Wada", "Wada2"), ("Oowada", "Oowada2"), ("Ito", "Ito2")]);
        let locals: Vec<&str> = names.mapping().map(|e| e.local.as_str()).collect();

        assert_eq!(locals, vec!["Oowada", "Wada", "Ito"]);
    }

    #[test]
    fn test_mapping_length_counts_characters() {
        let names = normalizer(&[("abcd", "Latin"), ("大和田", "Oowada")]);
        let first = names.mapping().next().unwrap();

        assert_eq!(first.local, "abcd");
    }

    #[test]
    fn test_substitute_prefers_longest_local_form() {
        let names = normalizer(&[("Wada", "Wada2"), ("Oowada", "Oowada2")]);

        assert_eq!(names.substitute("Oowada"), "Oowada2");
        assert_eq!(names.substitute("Wada vs Oowada"), "Wada2 vs Oowada2");
    }

    #[test]
    fn test_substitute_does_not_rescan_replacements() {
        let names = normalizer(&[("和田", "Wada"), ("Wada", "Broken")]);

        assert_eq!(names.substitute("和田"), "Wada");
    }

    #[test]
    fn test_substitute_with_empty_table() {
        let names = NameNormalizer::new();
        assert_eq!(names.substitute("Player1 vs Player2"), "Player1 vs Player2");
    }

    #[test]
    fn test_normalize_is_exact_match_only() {
        let names = normalizer(&[("Wada", "Wada2")]);

        assert_eq!(names.normalize("Wada"), "Wada2");
        assert_eq!(names.normalize("Oowada"), "Oowada");
        assert_eq!(names.normalize("Unknown"), "Unknown");
    }

    #[test]
    fn test_display_form() {
        let names = normalizer(&[("山田", "Yamada")]);

        assert_eq!(names.to_display_form("Yamada"), "山田 (Yamada)");
        assert_eq!(names.to_display_form("Alice"), "Alice");
    }

    #[test]
    fn test_missing_table_file() {
        let result = NameNormalizer::from_file("/nonexistent/replace_info.txt");
        assert!(matches!(result, Err(DescriptionError::MissingInput(_))));
    }
}
