pub mod transcriber;

pub use transcriber::{TimestampTranscriber, TranscriptLine, TranscriptionSummary};
