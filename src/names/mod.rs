/// Player name normalization
///
/// Maps local (native-script) player names onto the canonical names used
/// across result files and timestamp logs.

pub mod normalizer;

pub use normalizer::{NameEntry, NameNormalizer};
