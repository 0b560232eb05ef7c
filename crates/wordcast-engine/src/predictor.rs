// Next-word prediction with trigram -> bigram backoff

use tracing::debug;
use wordcast_core::RankedCandidates;
use wordcast_core::enums::PredictionSource;

use crate::ngram::{BigramMatch, NgramIndex};
use crate::options::PredictorOptions;

/// Ranked n-gram continuations and the tier that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub source: PredictionSource,
    /// Full n-gram keys ranked by count, best first.
    pub candidates: RankedCandidates<u64>,
}

impl Prediction {
    /// The most frequent n-gram key.
    pub fn best(&self) -> Option<&str> {
        self.candidates.best().map(|c| c.word.as_str())
    }
}

/// Queries the bigram and trigram indexes for already-resolved words.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    bigrams: &'a NgramIndex,
    trigrams: &'a NgramIndex,
    bigram_match: BigramMatch,
    max_candidates: usize,
}

impl<'a> Predictor<'a> {
    pub fn new(bigrams: &'a NgramIndex, trigrams: &'a NgramIndex) -> Self {
        Self::with_options(bigrams, trigrams, &PredictorOptions::default())
    }

    pub fn with_options(
        bigrams: &'a NgramIndex,
        trigrams: &'a NgramIndex,
        options: &PredictorOptions,
    ) -> Self {
        Self {
            bigrams,
            trigrams,
            bigram_match: options.bigram_match,
            max_candidates: options.max_candidates,
        }
    }

    /// Predict continuations for the resolved trailing words.
    ///
    /// With both words resolved the trigram index is tried first; if it has
    /// nothing, the bigram index is queried with `word2` alone and the
    /// result is tagged [`PredictionSource::BigramBackoff`]. With only
    /// `word2` resolved the bigram index is queried directly. Without a
    /// resolved `word2` there is nothing to predict from. An empty final
    /// result is reported as `None`.
    pub fn predict(&self, word1: Option<&str>, word2: Option<&str>) -> Option<Prediction> {
        let Some(word2) = word2 else {
            debug!(word1, "no resolved trailing word, skipping prediction");
            return None;
        };

        if let Some(word1) = word1 {
            let trigrams = self.query(self.trigrams, word1, Some(word2));
            if !trigrams.is_empty() {
                return Some(self.found(PredictionSource::Trigram, trigrams));
            }
            debug!(word1, word2, "no trigram match, backing off to bigrams");
            let bigrams = self.query(self.bigrams, word2, None);
            return self.non_empty(PredictionSource::BigramBackoff, bigrams);
        }

        let bigrams = self.query(self.bigrams, word2, None);
        self.non_empty(PredictionSource::Bigram, bigrams)
    }

    fn query(&self, index: &NgramIndex, word1: &str, word2: Option<&str>) -> RankedCandidates<u64> {
        let mut out = RankedCandidates::with_capacity(self.max_candidates);
        index.query_into(word1, word2, self.bigram_match, &mut out);
        out
    }

    fn non_empty(
        &self,
        source: PredictionSource,
        candidates: RankedCandidates<u64>,
    ) -> Option<Prediction> {
        if candidates.is_empty() {
            debug!(source = ?source, "no n-gram continuation found");
            return None;
        }
        Some(self.found(source, candidates))
    }

    fn found(&self, source: PredictionSource, candidates: RankedCandidates<u64>) -> Prediction {
        debug!(source = ?source, matches = candidates.len(), "prediction found");
        Prediction { source, candidates }
    }
}
