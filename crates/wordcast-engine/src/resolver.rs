// Single-token resolution: exact -> prefix -> fuzzy backoff

use tracing::debug;
use wordcast_core::enums::MatchStage;
use wordcast_core::{Candidate, RankedCandidates};

use crate::lexicon::{DEFAULT_MAX_DISTANCE, Lexicon, candidate_buffer};
use crate::options::PredictorOptions;

/// Outcome of resolving one token against the lexicon.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The top-ranked candidate of the winning stage.
    pub candidate: Candidate<f64>,
    /// The stage that produced it.
    pub stage: MatchStage,
    /// Everything the winning stage ranked, best first.
    pub candidates: RankedCandidates<f64>,
}

impl Resolution {
    /// The resolved word.
    pub fn word(&self) -> &str {
        &self.candidate.word
    }

    /// Unigram probability of the resolved word.
    pub fn probability(&self) -> f64 {
        self.candidate.score
    }
}

/// Resolution of the two trailing words of a line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSet {
    /// Second-to-last word.
    pub first: Option<Resolution>,
    /// Last word.
    pub second: Option<Resolution>,
}

impl SearchSet {
    /// Resolved text of the second-to-last word.
    pub fn first_word(&self) -> Option<&str> {
        self.first.as_ref().map(Resolution::word)
    }

    /// Resolved text of the last word.
    pub fn second_word(&self) -> Option<&str> {
        self.second.as_ref().map(Resolution::word)
    }
}

/// Resolves tokens against a lexicon with the fixed backoff order.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    lexicon: &'a Lexicon,
    max_distance: f32,
    max_candidates: usize,
}

impl<'a> Resolver<'a> {
    /// Resolver with default threshold and candidate capacity.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            max_distance: DEFAULT_MAX_DISTANCE,
            max_candidates: PredictorOptions::default().max_candidates,
        }
    }

    /// Resolver configured from `options`.
    pub fn with_options(lexicon: &'a Lexicon, options: &PredictorOptions) -> Self {
        Self {
            lexicon,
            max_distance: options.max_edit_distance,
            max_candidates: options.max_candidates,
        }
    }

    /// Resolve `token`: exact match, else prefix completion, else fuzzy
    /// correction. The first stage that finds anything wins, regardless of
    /// the scores later stages would produce.
    pub fn resolve(&self, token: &str) -> Option<Resolution> {
        let mut candidates = candidate_buffer(self.max_candidates);

        let stage = if self.lexicon.lookup_exact(token, &mut candidates).is_some() {
            MatchStage::Exact
        } else if self.lexicon.lookup_prefix(token, &mut candidates) {
            MatchStage::Prefix
        } else if self
            .lexicon
            .lookup_fuzzy(token, self.max_distance, &mut candidates)
        {
            MatchStage::Fuzzy
        } else {
            debug!(token, "token unresolved");
            return None;
        };

        let candidate = candidates.best()?.clone();
        if candidate.score <= 0.0 {
            debug!(token, stage = stage.as_str(), "best candidate has probability 0");
            return None;
        }
        debug!(
            token,
            stage = stage.as_str(),
            word = %candidate.word,
            probability = candidate.score,
            "token resolved"
        );
        Some(Resolution {
            candidate,
            stage,
            candidates,
        })
    }

    /// Resolve the two trailing words of a line independently.
    pub fn resolve_pair(&self, word1: Option<&str>, word2: Option<&str>) -> SearchSet {
        SearchSet {
            first: word1.and_then(|w| self.resolve(w)),
            second: word2.and_then(|w| self.resolve(w)),
        }
    }
}
