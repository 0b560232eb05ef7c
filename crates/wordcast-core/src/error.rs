// Core error type

/// Errors raised by the core data structures.
///
/// Lookup misses are not errors: they are `None` / empty candidate lists and
/// drive the backoff chain. Only contract violations by the caller end up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordcastError {
    /// A word contains a character outside `a`..=`z`.
    #[error("invalid character {ch:?} in word {word:?}: only lowercase a-z is indexed")]
    InvalidInput { word: String, ch: char },

    /// An empty word was presented to the lexicon.
    #[error("empty word cannot be indexed")]
    EmptyWord,

    /// An n-gram index node capacity below the minimum.
    #[error("node capacity {capacity} is too small (minimum is {minimum})")]
    InvalidCapacity { capacity: usize, minimum: usize },
}
