// Unigram lexicon: trie-backed exact, prefix and fuzzy lookup
//
// The lexicon is filled once during the bulk load and is read-only
// afterwards. Every lookup ranks its matches by unigram probability
// (`count / total_count`) into a caller-supplied `RankedCandidates`.

mod trie;

pub use trie::TrieNode;

use tracing::trace;
use wordcast_core::character::{first_unindexed, letter_index};
use wordcast_core::distance::{MAX_NORMALIZED_DISTANCE, normalize, normalized_distance};
use wordcast_core::{Eviction, RankedCandidates, WordcastError};

use crate::resolver::{Resolution, Resolver};

/// Default fuzzy admission threshold.
pub const DEFAULT_MAX_DISTANCE: f32 = MAX_NORMALIZED_DISTANCE;

/// A ranking buffer for lexicon lookups.
///
/// Among words tied at the minimum probability, a full buffer gives up the
/// one ranked first.
pub fn candidate_buffer(capacity: usize) -> RankedCandidates<f64> {
    RankedCandidates::with_eviction(capacity, Eviction::FirstMinimum)
}

/// Trie of lowercase words with occurrence counts.
#[derive(Debug, Default, Clone)]
pub struct Lexicon {
    root: TrieNode,
    /// Sum of all inserted counts; the probability normalizer.
    total_count: u64,
    /// Number of distinct words.
    word_count: usize,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word` with `count` occurrences.
    ///
    /// Repeated insertion of the same word accumulates its count. The word
    /// must be non-empty lowercase `a`..=`z`; anything else is rejected
    /// before the trie is touched.
    pub fn insert(&mut self, word: &str, count: u64) -> Result<(), WordcastError> {
        if word.is_empty() {
            return Err(WordcastError::EmptyWord);
        }
        if let Some(ch) = first_unindexed(word) {
            return Err(WordcastError::InvalidInput {
                word: word.to_string(),
                ch,
            });
        }

        let mut node = &mut self.root;
        for index in word.chars().filter_map(letter_index) {
            node = node.child_or_insert(index);
        }
        if !node.is_end_of_word() {
            self.word_count += 1;
        }
        node.mark_word(count);
        self.total_count = self.total_count.saturating_add(count);
        Ok(())
    }

    /// Sum of all inserted occurrence counts.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Returns `true` if no word has been inserted.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// The trie root.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Occurrence count of `word`, if it is a lexicon word.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.root
            .descend(word)
            .filter(|node| node.is_end_of_word())
            .map(TrieNode::count)
    }

    /// Returns `true` if `word` is a lexicon word.
    pub fn contains(&self, word: &str) -> bool {
        self.count(word).is_some()
    }

    /// Unigram probability for an occurrence count.
    ///
    /// An empty (or all-zero) lexicon yields 0 rather than dividing by zero.
    pub fn probability(&self, count: u64) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            count as f64 / self.total_count as f64
        }
    }

    /// Look up `word` exactly.
    ///
    /// Returns its probability and records it into `out`, or `None` if the
    /// letter path is missing, does not end a word, or the word has
    /// probability 0.
    pub fn lookup_exact(&self, word: &str, out: &mut RankedCandidates<f64>) -> Option<f64> {
        let count = self.count(word)?;
        let probability = self.probability(count);
        if probability <= 0.0 {
            return None;
        }
        out.insert(word, probability);
        Some(probability)
    }

    /// Collect every word starting with `prefix` (including `prefix` itself
    /// when it is a word) into `out`.
    ///
    /// Returns `true` if at least one word was found.
    pub fn lookup_prefix(&self, prefix: &str, out: &mut RankedCandidates<f64>) -> bool {
        let Some(start) = self.root.descend(prefix) else {
            return false;
        };

        let mut found = false;
        let mut buf = prefix.to_string();
        start.for_each_word(&mut buf, &mut |word, node| {
            found = true;
            out.insert(word, self.probability(node.count()));
        });
        found
    }

    /// Collect every lexicon word whose normalized edit distance to `token`
    /// is at most `max_distance` into `out`.
    ///
    /// The whole trie is enumerated from the root. Admitted words are ranked
    /// by probability; the distance is only carried along.
    ///
    /// Returns `true` if at least one word was within the threshold.
    pub fn lookup_fuzzy(
        &self,
        token: &str,
        max_distance: f32,
        out: &mut RankedCandidates<f64>,
    ) -> bool {
        let token_len = token.chars().count();
        let mut found = false;
        let mut buf = String::new();
        self.root.for_each_word(&mut buf, &mut |word, node| {
            // Levenshtein distance is at least the length difference, so
            // words far longer or shorter cannot pass the threshold.
            let word_len = word.len();
            if normalize(token_len.abs_diff(word_len), token_len, word_len) > max_distance {
                return;
            }
            let distance = normalized_distance(token, word);
            if distance <= max_distance {
                trace!(token, word, distance, "fuzzy match");
                found = true;
                out.insert_with_distance(word, self.probability(node.count()), distance);
            }
        });
        found
    }

    /// Resolve `token` through the exact → prefix → fuzzy backoff chain with
    /// default settings.
    pub fn resolve(&self, token: &str) -> Option<Resolution> {
        Resolver::new(self).resolve(token)
    }

    /// Every word with its count, in alphabetical order.
    pub fn words(&self) -> Vec<(String, u64)> {
        let mut words = Vec::with_capacity(self.word_count);
        let mut buf = String::new();
        self.root.for_each_word(&mut buf, &mut |word, node| {
            words.push((word.to_string(), node.count()));
        });
        words
    }
}
