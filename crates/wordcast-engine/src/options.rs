// Engine options

use wordcast_core::candidate::DEFAULT_CAPACITY;
use wordcast_core::distance::MAX_NORMALIZED_DISTANCE;

use crate::ngram::{BigramMatch, DEFAULT_NODE_CAPACITY};

/// Tunables for resolution and prediction.
///
/// The defaults reproduce the reference behavior: three candidates, a 0.3
/// normalized edit-distance threshold, 200 keys per tree node, and raw
/// character-prefix bigram matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictorOptions {
    /// Capacity of every ranking buffer.
    pub max_candidates: usize,
    /// Fuzzy admission threshold (normalized edit distance, inclusive).
    pub max_edit_distance: f32,
    /// Maximum keys per n-gram tree node.
    pub node_capacity: usize,
    /// Bigram key matching policy.
    pub bigram_match: BigramMatch,
}

impl Default for PredictorOptions {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_CAPACITY,
            max_edit_distance: MAX_NORMALIZED_DISTANCE,
            node_capacity: DEFAULT_NODE_CAPACITY,
            bigram_match: BigramMatch::RawPrefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PredictorOptions::default();
        assert_eq!(options.max_candidates, 3);
        assert_eq!(options.max_edit_distance, 0.3);
        assert_eq!(options.node_capacity, 200);
        assert_eq!(options.bigram_match, BigramMatch::RawPrefix);
    }
}
