/// Description document composition
///
/// Title, comment template and participant list, followed by the
/// transcribed timestamp log and the trailing tag line.

pub mod composer;
pub mod templates;

pub use composer::DescriptionComposer;
pub use templates::{expand_escapes, CommentTemplates, Language, SessionKind};
