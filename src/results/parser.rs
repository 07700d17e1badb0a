use crate::error::Result;
use crate::names::NameNormalizer;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One recorded game: match id plus both players' canonical names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// "M" followed by digits, e.g. "M01"
    pub match_id: String,
    pub player1: String,
    pub player2: String,
}

impl MatchRecord {
    /// Canonical name for a placeholder slot (1 or 2)
    pub fn player(&self, slot: u8) -> &str {
        if slot == 1 {
            &self.player1
        } else {
            &self.player2
        }
    }
}

/// Match id -> record, unique per match id
pub type MatchMap = BTreeMap<String, MatchRecord>;

/// Everything derived from a result file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResults {
    pub matches: MatchMap,

    /// Distinct canonical names, sorted case-insensitively
    pub participants: Vec<String>,

    /// Display form of each participant, parallel to `participants`
    pub display_names: Vec<String>,
}

impl ParsedResults {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Parser for `M<number>: <name1> vs <name2>` result listings
#[derive(Debug, Clone)]
pub struct ResultParser<'a> {
    names: &'a NameNormalizer,
    line_pattern: Regex,
}

impl<'a> ResultParser<'a> {
    pub fn new(names: &'a NameNormalizer) -> Result<Self> {
        Ok(Self {
            names,
            line_pattern: Regex::new(r"^(M\d+):\s*(.*?)\s+vs\s+(.*)$")?,
        })
    }

    /// Parse result lines; lines that do not look like a match are ignored
    pub fn parse<I, S>(&self, lines: I) -> ParsedResults
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matches = MatchMap::new();

        for line in lines {
            let line = line.as_ref().trim();

            match self.parse_line(line) {
                Some(record) => {
                    if matches.contains_key(&record.match_id) {
                        debug!("Match {} listed again, later entry wins", record.match_id);
                    }
                    matches.insert(record.match_id.clone(), record);
                }
                None => {
                    if !line.is_empty() {
                        debug!("Skipping non-match line: {}", line);
                    }
                }
            }
        }

        let participants = sorted_participants(&matches);
        let display_names = participants
            .iter()
            .map(|name| self.names.to_display_form(name))
            .collect();

        ParsedResults {
            matches,
            participants,
            display_names,
        }
    }

    /// Parse a single result line into a record
    pub fn parse_line(&self, line: &str) -> Option<MatchRecord> {
        let caps = self.line_pattern.captures(line)?;

        Some(MatchRecord {
            match_id: caps[1].to_string(),
            player1: self.names.normalize(caps[2].trim()).to_string(),
            player2: self.names.normalize(caps[3].trim()).to_string(),
        })
    }
}

fn sorted_participants(matches: &MatchMap) -> Vec<String> {
    let distinct: BTreeSet<&str> = matches
        .values()
        .flat_map(|m| [m.player1.as_str(), m.player2.as_str()])
        .collect();

    let mut participants: Vec<String> = distinct.into_iter().map(String::from).collect();
    // Ties on lowercase fall back to the exact spelling so ordering is stable
    participants.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    participants
}
