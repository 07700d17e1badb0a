use crate::error::{DescriptionError, Result};
use crate::results::MatchMap;
use regex::Regex;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

const PLAYER1: &str = "Player1";
const PLAYER2: &str = "Player2";

/// One classified timestamp-log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// `0:12:34 M03: Player1 - Character vs Player2 - Character`
    MatchHeader {
        timecode: String,
        match_id: String,
        suffix1: String,
        suffix2: String,
    },
    /// `Player2 win by 3:1`
    Win { winner_slot: u8, score: String },
    /// Anything else, emitted unchanged
    Passthrough(String),
}

/// Counters collected over one transcription pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionSummary {
    pub headers: usize,
    pub wins: usize,
    pub passthrough: usize,
    /// Match ids referenced by the log but absent from the results
    pub unknown_matches: Vec<String>,
}

impl fmt::Display for TranscriptionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} headers, {} win lines, {} passthrough",
            self.headers, self.wins, self.passthrough
        )?;
        if !self.unknown_matches.is_empty() {
            write!(f, ", unknown matches: {}", self.unknown_matches.join(", "))?;
        }
        Ok(())
    }
}

/// Rewrites `Player1`/`Player2` placeholders in a timestamp log
#[derive(Debug, Clone)]
pub struct TimestampTranscriber {
    header_pattern: Regex,
    win_pattern: Regex,
}

impl TimestampTranscriber {
    pub fn new() -> Result<Self> {
        Ok(Self {
            header_pattern: Regex::new(
                r"^(\d+:\d+:\d+)\s+(M\d+):\s+Player1\s+-\s+(.*?)\s+vs\s+Player2\s+-\s+(.*)$",
            )?,
            win_pattern: Regex::new(r"^(Player[12])\s+win\s+by\s+(\d+:\d+)$")?,
        })
    }

    /// Read a timestamp log from disk
    pub fn read_log<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DescriptionError::MissingInput(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let lines: Vec<String> = content.lines().map(String::from).collect();
        info!("⏱️ Read {} timestamp lines from: {}", lines.len(), path.display());
        Ok(lines)
    }

    /// Classify a right-trimmed line
    ///
    /// Win lines are only recognized while a match is in progress; before
    /// the first header they are plain passthrough.
    pub fn classify(&self, line: &str, in_match: bool) -> TranscriptLine {
        if let Some(caps) = self.header_pattern.captures(line) {
            return TranscriptLine::MatchHeader {
                timecode: caps[1].to_string(),
                match_id: caps[2].to_string(),
                suffix1: caps[3].to_string(),
                suffix2: caps[4].to_string(),
            };
        }

        if in_match {
            if let Some(caps) = self.win_pattern.captures(line) {
                let winner_slot = if &caps[1] == PLAYER1 { 1 } else { 2 };
                return TranscriptLine::Win {
                    winner_slot,
                    score: caps[2].to_string(),
                };
            }
        }

        TranscriptLine::Passthrough(line.to_string())
    }

    /// Transcribe the log, one output line per input line
    pub fn transcribe<I, S>(&self, lines: I, matches: &MatchMap) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.transcribe_with_summary(lines, matches).0
    }

    /// Transcribe the log and report what was rewritten
    pub fn transcribe_with_summary<I, S>(
        &self,
        lines: I,
        matches: &MatchMap,
    ) -> (Vec<String>, TranscriptionSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = TranscriptionSummary::default();
        let mut current_match: Option<String> = None;
        let mut output = Vec::new();

        for line in lines {
            let line = line.as_ref().trim_end();

            let rendered = match self.classify(line, current_match.is_some()) {
                TranscriptLine::MatchHeader {
                    timecode,
                    match_id,
                    suffix1,
                    suffix2,
                } => {
                    summary.headers += 1;
                    let (p1, p2) = match matches.get(&match_id) {
                        Some(record) => (record.player1.as_str(), record.player2.as_str()),
                        None => {
                            warn!("Match {} has no result entry, keeping placeholders", match_id);
                            if !summary.unknown_matches.contains(&match_id) {
                                summary.unknown_matches.push(match_id.clone());
                            }
                            (PLAYER1, PLAYER2)
                        }
                    };
                    let rendered = format!(
                        "{} {}: {} - {} vs {} - {}",
                        timecode, match_id, p1, suffix1, p2, suffix2
                    );
                    current_match = Some(match_id);
                    rendered
                }
                TranscriptLine::Win { winner_slot, score } => {
                    summary.wins += 1;
                    let winner = current_match
                        .as_ref()
                        .and_then(|id| matches.get(id))
                        .map(|record| record.player(winner_slot))
                        .unwrap_or(if winner_slot == 1 { PLAYER1 } else { PLAYER2 });
                    format!("{} win by {}", winner, score)
                }
                TranscriptLine::Passthrough(text) => {
                    summary.passthrough += 1;
                    text
                }
            };

            output.push(rendered);
        }

        debug!("Transcription pass: {}", summary);
        (output, summary)
    }
}
