// Bounded top-k ranking buffer shared by every lookup

/// Default number of candidates retained by a ranking buffer.
pub const DEFAULT_CAPACITY: usize = 3;

/// A ranked candidate word.
///
/// `score` is the ranking key: a unigram probability for lexicon lookups or
/// a raw occurrence count for n-gram queries. `distance` is only set for
/// fuzzy matches and never takes part in ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<S> {
    /// Candidate text (a word, or a full n-gram key).
    pub word: String,
    /// Ranking score (higher is better).
    pub score: S,
    /// Normalized edit distance to the query token (fuzzy matches only).
    pub distance: Option<f32>,
}

impl<S> Candidate<S> {
    /// Create a candidate without a distance.
    pub fn new(word: impl Into<String>, score: S) -> Self {
        Self {
            word: word.into(),
            score,
            distance: None,
        }
    }
}

/// Which entry a full buffer gives up when several tie for the minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Eviction {
    /// Replace the most recently ranked of the tied entries (the last slot).
    /// Used for n-gram counts.
    #[default]
    LastMinimum,
    /// Replace the earliest ranked of the tied entries. Used for unigram
    /// probabilities.
    FirstMinimum,
}

/// Fixed-capacity buffer keeping the `k` best candidates seen so far.
///
/// Entries are always sorted by descending score. Equal scores keep their
/// insertion order. Once full, a new candidate is admitted only if its score
/// is strictly greater than the current minimum, which it then replaces
/// according to the buffer's [`Eviction`] policy.
///
/// The buffer does not deduplicate words: the same word may be admitted
/// twice when two generation paths produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidates<S> {
    capacity: usize,
    eviction: Eviction,
    entries: Vec<Candidate<S>>,
}

impl<S: PartialOrd + Copy> RankedCandidates<S> {
    /// Create an empty buffer with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer holding at most `capacity` entries.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_eviction(capacity, Eviction::default())
    }

    /// Create an empty buffer with an explicit tie-eviction policy.
    pub fn with_eviction(capacity: usize, eviction: Eviction) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            eviction,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// The tie-eviction policy of this buffer.
    pub fn eviction(&self) -> Eviction {
        self.eviction
    }

    /// Offer a candidate. Returns `true` if it was admitted.
    pub fn insert(&mut self, word: &str, score: S) -> bool {
        self.offer(word, score, None)
    }

    /// Offer a fuzzy candidate carrying its normalized edit distance.
    ///
    /// The distance is stored alongside the entry; ranking still uses `score`.
    pub fn insert_with_distance(&mut self, word: &str, score: S, distance: f32) -> bool {
        self.offer(word, score, Some(distance))
    }

    fn offer(&mut self, word: &str, score: S, distance: Option<f32>) -> bool {
        let candidate = Candidate {
            word: word.to_string(),
            score,
            distance,
        };
        if self.entries.len() < self.capacity {
            self.entries.push(candidate);
            self.sift_up(self.entries.len() - 1);
            return true;
        }
        // Sorted descending, so the minimum run sits at the tail.
        let Some(min) = self.min_score() else {
            return false;
        };
        if score <= min {
            return false;
        }
        let slot = match self.eviction {
            Eviction::LastMinimum => self.entries.len() - 1,
            Eviction::FirstMinimum => self.entries.partition_point(|c| c.score > min),
        };
        self.entries[slot] = candidate;
        self.sift_up(slot);
        true
    }

    /// Move the entry at `index` towards the front while it outranks its
    /// predecessor. Ties stop the move, which keeps insertion order.
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && self.entries[index].score > self.entries[index - 1].score {
            self.entries.swap(index, index - 1);
            index -= 1;
        }
    }

    /// The top-ranked candidate, if any.
    pub fn best(&self) -> Option<&Candidate<S>> {
        self.entries.first()
    }

    /// The lowest retained score, if any.
    pub fn min_score(&self) -> Option<S> {
        self.entries.last().map(|c| c.score)
    }

    /// Number of retained candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been admitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the buffer holds `capacity` entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Maximum number of retained candidates.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained candidates, best first.
    pub fn as_slice(&self) -> &[Candidate<S>] {
        &self.entries
    }

    /// Iterate over retained candidates, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate<S>> {
        self.entries.iter()
    }

    /// Consume the buffer and return its candidates, best first.
    pub fn into_vec(self) -> Vec<Candidate<S>> {
        self.entries
    }

    /// Remove every candidate, keeping the capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<S: PartialOrd + Copy> Default for RankedCandidates<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> IntoIterator for RankedCandidates<S> {
    type Item = Candidate<S>;
    type IntoIter = std::vec::IntoIter<Candidate<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a RankedCandidates<S> {
    type Item = &'a Candidate<S>;
    type IntoIter = std::slice::Iter<'a, Candidate<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores<S: Copy>(ranked: &RankedCandidates<S>) -> Vec<S>
    where
        S: PartialOrd,
    {
        ranked.iter().map(|c| c.score).collect()
    }

    #[test]
    fn empty_buffer_has_no_best() {
        let ranked: RankedCandidates<u64> = RankedCandidates::new();
        assert!(ranked.best().is_none());
        assert!(ranked.is_empty());
        assert_eq!(ranked.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn keeps_top_three_by_count() {
        let mut ranked = RankedCandidates::new();
        for (word, score) in [("a", 5u64), ("b", 3), ("c", 8), ("d", 1)] {
            ranked.insert(word, score);
        }
        assert_eq!(scores(&ranked), vec![8, 5, 3]);

        let before = ranked.clone();
        assert!(!ranked.insert("e", 2));
        assert_eq!(ranked, before);
    }

    #[test]
    fn equal_to_minimum_is_rejected_when_full() {
        let mut ranked = RankedCandidates::new();
        for (word, score) in [("a", 5u64), ("b", 4), ("c", 3)] {
            ranked.insert(word, score);
        }
        assert!(!ranked.insert("d", 3));
        assert!(ranked.insert("e", 4));
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "e"]);
    }

    #[test]
    fn count_buffer_evicts_last_tied_minimum() {
        let mut ranked = RankedCandidates::new();
        for (word, score) in [("caa", 5u64), ("cab", 1), ("cac", 1), ("cad", 3)] {
            ranked.insert(word, score);
        }
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["caa", "cad", "cab"]);
        assert_eq!(ranked.eviction(), Eviction::LastMinimum);
    }

    #[test]
    fn probability_buffer_evicts_first_tied_minimum() {
        let mut ranked = RankedCandidates::with_eviction(3, Eviction::FirstMinimum);
        for (word, score) in [("caa", 0.5f64), ("cab", 0.1), ("cac", 0.1), ("cad", 0.3)] {
            ranked.insert(word, score);
        }
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["caa", "cad", "cac"]);

        assert!(!ranked.insert("cae", 0.1));
        assert!(ranked.insert("caf", 0.2));
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["caa", "cad", "caf"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut ranked = RankedCandidates::new();
        ranked.insert("first", 0.25f64);
        ranked.insert("second", 0.25);
        ranked.insert("top", 0.5);
        let words: Vec<&str> = ranked.iter().map(|c| c.word.as_str()).collect();
        assert_eq!(words, vec!["top", "first", "second"]);
    }

    #[test]
    fn duplicates_are_not_filtered() {
        let mut ranked = RankedCandidates::new();
        ranked.insert("cat", 2u64);
        ranked.insert("cat", 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn distance_is_carried_but_not_ranked() {
        let mut ranked = RankedCandidates::new();
        ranked.insert_with_distance("near", 0.1f64, 0.0);
        ranked.insert_with_distance("far", 0.9, 0.3);
        let best = ranked.best().unwrap();
        assert_eq!(best.word, "far");
        assert_eq!(best.distance, Some(0.3));
        assert_eq!(ranked.as_slice()[1].distance, Some(0.0));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut ranked = RankedCandidates::with_capacity(0);
        assert_eq!(ranked.capacity(), 1);
        ranked.insert("a", 1u64);
        ranked.insert("b", 2);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.best().unwrap().word, "b");
        assert!(ranked.is_full());
        assert_eq!(ranked.min_score(), Some(2));
    }

    #[test]
    fn into_vec_is_best_first() {
        let mut ranked = RankedCandidates::with_capacity(5);
        for (i, word) in ["w", "x", "y", "z"].iter().enumerate() {
            ranked.insert(word, i as u64);
        }
        let words: Vec<String> = ranked.into_vec().into_iter().map(|c| c.word).collect();
        assert_eq!(words, vec!["z", "y", "x", "w"]);
    }
}
