/// Hellish Quart session description generator
///
/// Turns a match-result listing and a raw timestamp log into English and
/// Japanese video descriptions, replacing the `Player1`/`Player2`
/// placeholders with the real player names.

pub mod config;
pub mod description;
pub mod error;
pub mod names;
pub mod processing;
pub mod results;
pub mod transcript;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder, TitleConfig};
pub use crate::description::{CommentTemplates, DescriptionComposer, Language, SessionKind};
pub use crate::error::{DescriptionError, Result};
pub use crate::names::{NameEntry, NameNormalizer};
pub use crate::processing::{DescriptionDocument, DescriptionGenerator, GenerationMode, GenerationResult};
pub use crate::results::{MatchMap, MatchRecord, ParsedResults, ResultParser};
pub use crate::transcript::{TimestampTranscriber, TranscriptLine, TranscriptionSummary};
