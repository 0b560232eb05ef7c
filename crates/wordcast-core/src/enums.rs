// Shared enums: TokenKind, MatchStage, NgramOrder, PredictionSource

/// Classification of a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Lowercase word made of `a`..=`z` only. The only kind that is
    /// looked up in the lexicon.
    Word,
    /// Token starting with a digit (integers and decimals).
    Number,
    /// `#` followed by alphanumerics.
    Hashtag,
    /// Mixed token that is neither a clean word nor a number.
    Other,
}

impl TokenKind {
    /// Returns `true` for tokens that may be resolved against the lexicon.
    pub fn is_word(self) -> bool {
        self == TokenKind::Word
    }
}

/// Backoff stage that resolved a token.
///
/// Ordering follows the backoff chain: `Exact < Prefix < Fuzzy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchStage {
    /// The token itself is a lexicon word.
    Exact,
    /// The token is a prefix of at least one lexicon word.
    Prefix,
    /// A lexicon word lies within the normalized edit-distance threshold.
    Fuzzy,
}

impl MatchStage {
    /// Short lowercase label, used by the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStage::Exact => "exact",
            MatchStage::Prefix => "prefix",
            MatchStage::Fuzzy => "fuzzy",
        }
    }
}

/// Order of an n-gram index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NgramOrder {
    Bigram,
    Trigram,
}

impl NgramOrder {
    /// Number of words per key.
    pub fn n(self) -> usize {
        match self {
            NgramOrder::Bigram => 2,
            NgramOrder::Trigram => 3,
        }
    }
}

/// Where a next-word prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionSource {
    /// Trigram query on both trailing words.
    Trigram,
    /// Bigram query after the trigram query found nothing.
    BigramBackoff,
    /// Bigram query on a single trailing word.
    Bigram,
}

impl PredictionSource {
    /// Order of the index that produced the candidates.
    pub fn order(self) -> NgramOrder {
        match self {
            PredictionSource::Trigram => NgramOrder::Trigram,
            PredictionSource::BigramBackoff | PredictionSource::Bigram => NgramOrder::Bigram,
        }
    }

    /// Returns `true` when the trigram stage was tried and came up empty.
    pub fn is_degraded(self) -> bool {
        self == PredictionSource::BigramBackoff
    }

    /// Short lowercase label, used by the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionSource::Trigram => "trigram",
            PredictionSource::BigramBackoff => "bigram backoff",
            PredictionSource::Bigram => "bigram",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_stage_orders_by_backoff_chain() {
        assert!(MatchStage::Exact < MatchStage::Prefix);
        assert!(MatchStage::Prefix < MatchStage::Fuzzy);
        assert_eq!(MatchStage::Fuzzy.as_str(), "fuzzy");
    }

    #[test]
    fn prediction_source_order() {
        assert_eq!(PredictionSource::Trigram.order(), NgramOrder::Trigram);
        assert_eq!(PredictionSource::BigramBackoff.order(), NgramOrder::Bigram);
        assert!(PredictionSource::BigramBackoff.is_degraded());
        assert!(!PredictionSource::Bigram.is_degraded());
        assert_eq!(NgramOrder::Trigram.n(), 3);
    }

    #[test]
    fn only_words_are_resolvable() {
        assert!(TokenKind::Word.is_word());
        assert!(!TokenKind::Number.is_word());
        assert!(!TokenKind::Hashtag.is_word());
        assert!(!TokenKind::Other.is_word());
    }
}
