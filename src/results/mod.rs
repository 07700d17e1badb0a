/// Match result parsing
///
/// Turns a free-text result listing into match records keyed by match id,
/// and derives the session date from the result file name.

pub mod parser;
pub mod session_date;

pub use parser::{MatchMap, MatchRecord, ParsedResults, ResultParser};
pub use session_date::{parse_date_prefix, session_date_from_path};
