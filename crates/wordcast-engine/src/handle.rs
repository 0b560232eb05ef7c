// PredictorHandle: owns the three corpora and runs the full completion flow.
//
// The handle owns the lexicon and both n-gram indexes and hands out
// short-lived `Resolver` / `Predictor` views over them for each call. It is
// read-only after construction, so it can be shared across threads.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use hashbrown::HashSet;
use tracing::debug;
use wordcast_core::WordcastError;
use wordcast_core::enums::PredictionSource;

use crate::lexicon::Lexicon;
use crate::loader::{self, LoadError};
use crate::ngram::NgramIndex;
use crate::options::PredictorOptions;
use crate::predictor::{Prediction, Predictor};
use crate::processor::{self, Correction};
use crate::resolver::{Resolution, Resolver, SearchSet};
use crate::tokenizer;

/// Error type for PredictorHandle construction failures.
#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    /// A corpus file could not be read.
    #[error("failed to load corpus: {0}")]
    Load(#[from] LoadError),

    /// The options describe an unusable index.
    #[error("invalid options: {0}")]
    Options(#[from] WordcastError),
}

/// Locations of the three corpus files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFiles {
    pub unigrams: PathBuf,
    pub bigrams: PathBuf,
    pub trigrams: PathBuf,
}

impl CorpusFiles {
    pub const UNIGRAMS: &'static str = "unigrams.csv";
    pub const BIGRAMS: &'static str = "bigrams.csv";
    pub const TRIGRAMS: &'static str = "trigrams.csv";

    /// The standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            unigrams: dir.join(Self::UNIGRAMS),
            bigrams: dir.join(Self::BIGRAMS),
            trigrams: dir.join(Self::TRIGRAMS),
        }
    }

    /// Returns `true` if all three files exist.
    pub fn exist(&self) -> bool {
        self.unigrams.is_file() && self.bigrams.is_file() && self.trigrams.is_file()
    }
}

impl Default for CorpusFiles {
    /// The standard file names relative to the current directory.
    fn default() -> Self {
        Self::in_dir(Path::new(""))
    }
}

/// One presented continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The full n-gram key.
    pub text: String,
    /// Its corpus count.
    pub count: u64,
    /// Corrected context followed by the n-gram.
    pub full_context: String,
}

/// Result of [`PredictorHandle::complete`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Corrected context the suggestions are appended to. On bigram
    /// backoff this already ends with the resolved `word1`.
    pub context: String,
    /// Resolution of the two trailing words.
    pub search: SearchSet,
    /// Tier that produced the suggestions, `None` when nothing was found.
    pub source: Option<PredictionSource>,
    /// Distinct suggestions, most frequent first.
    pub suggestions: Vec<Suggestion>,
    /// Corrected context plus the trailing words as typed.
    pub fallback: String,
}

impl Completion {
    /// Returns `true` if at least one suggestion was found.
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// Owns the lexicon and n-gram indexes and exposes the prediction pipeline.
#[derive(Debug, Clone)]
pub struct PredictorHandle {
    lexicon: Lexicon,
    bigrams: NgramIndex,
    trigrams: NgramIndex,
    options: PredictorOptions,
}

impl PredictorHandle {
    /// Assemble a handle from already built structures.
    pub fn from_parts(
        lexicon: Lexicon,
        bigrams: NgramIndex,
        trigrams: NgramIndex,
        options: PredictorOptions,
    ) -> Self {
        Self {
            lexicon,
            bigrams,
            trigrams,
            options,
        }
    }

    /// Build a handle from three `key,count` CSV readers.
    pub fn from_readers<U, B, T>(
        unigrams: U,
        bigrams: B,
        trigrams: T,
        options: PredictorOptions,
    ) -> Result<Self, HandleError>
    where
        U: BufRead,
        B: BufRead,
        T: BufRead,
    {
        let mut handle = Self::empty(options)?;
        loader::load_unigrams(unigrams, &mut handle.lexicon)?;
        loader::load_ngrams(bigrams, &mut handle.bigrams)?;
        loader::load_ngrams(trigrams, &mut handle.trigrams)?;
        Ok(handle)
    }

    /// Build a handle from corpus files.
    pub fn open(files: &CorpusFiles, options: PredictorOptions) -> Result<Self, HandleError> {
        let mut handle = Self::empty(options)?;
        loader::load_unigrams_from_path(&files.unigrams, &mut handle.lexicon)?;
        loader::load_ngrams_from_path(&files.bigrams, &mut handle.bigrams)?;
        loader::load_ngrams_from_path(&files.trigrams, &mut handle.trigrams)?;
        Ok(handle)
    }

    /// Build a handle from the standard corpus files inside `dir`.
    pub fn from_dir(dir: &Path, options: PredictorOptions) -> Result<Self, HandleError> {
        Self::open(&CorpusFiles::in_dir(dir), options)
    }

    fn empty(options: PredictorOptions) -> Result<Self, HandleError> {
        Ok(Self {
            lexicon: Lexicon::new(),
            bigrams: NgramIndex::with_capacity(options.node_capacity)?,
            trigrams: NgramIndex::with_capacity(options.node_capacity)?,
            options,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn bigrams(&self) -> &NgramIndex {
        &self.bigrams
    }

    pub fn trigrams(&self) -> &NgramIndex {
        &self.trigrams
    }

    pub fn options(&self) -> &PredictorOptions {
        &self.options
    }

    /// Resolver over the lexicon using the handle's options.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::with_options(&self.lexicon, &self.options)
    }

    /// Predictor over both indexes using the handle's options.
    pub fn predictor(&self) -> Predictor<'_> {
        Predictor::with_options(&self.bigrams, &self.trigrams, &self.options)
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Resolve a single token.
    pub fn resolve(&self, token: &str) -> Option<Resolution> {
        self.resolver().resolve(token)
    }

    /// Predict continuations for already resolved trailing words.
    pub fn predict(&self, word1: Option<&str>, word2: Option<&str>) -> Option<Prediction> {
        self.predictor().predict(word1, word2)
    }

    /// Tokenize `line` and resolve every token.
    pub fn corrections(&self, line: &str) -> Vec<Correction> {
        processor::correct_tokens(&tokenizer::tokenize(line), &self.resolver())
    }

    /// Tokenize `line` and rebuild it with every word corrected.
    pub fn correct(&self, line: &str) -> String {
        processor::correct(&tokenizer::tokenize(line), &self.resolver())
    }

    /// Run the whole pipeline on a raw input line: tokenize, split off the
    /// trailing words, correct the context, resolve the trailing words, and
    /// predict with trigram -> bigram backoff.
    pub fn complete(&self, line: &str) -> Completion {
        let parsed = tokenizer::parse_line(line);
        let resolver = self.resolver();
        let corrected = processor::correct(&parsed.context, &resolver);
        let search = resolver.resolve_pair(parsed.word1_text(), parsed.word2_text());

        let mut fallback = corrected.clone();
        for word in [parsed.word1_text(), parsed.word2_text()].into_iter().flatten() {
            fallback.push_str(word);
            fallback.push(' ');
        }
        fallback.truncate(fallback.trim_end().len());

        let Some(prediction) = self.predict(search.first_word(), search.second_word()) else {
            debug!(line, "no suggestions, returning corrected line");
            return Completion {
                context: corrected,
                search,
                source: None,
                suggestions: Vec::new(),
                fallback,
            };
        };

        // Words that precede the predicted n-gram but are not part of it
        // move into the context.
        let mut context = corrected;
        let folded = match prediction.source {
            PredictionSource::Trigram => None,
            PredictionSource::BigramBackoff => search.first_word(),
            PredictionSource::Bigram => parsed.word1_text(),
        };
        if let Some(word) = folded {
            context.push_str(word);
            context.push(' ');
        }

        let suggestions = present(&context, &prediction);
        Completion {
            context,
            search,
            source: Some(prediction.source),
            suggestions,
            fallback,
        }
    }
}

/// Turn ranked n-grams into suggestions, dropping repeated keys.
fn present(context: &str, prediction: &Prediction) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    prediction
        .candidates
        .iter()
        .filter(|c| seen.insert(c.word.as_str()))
        .map(|c| Suggestion {
            text: c.word.clone(),
            count: c.score,
            full_context: format!("{context}{}", c.word),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wordcast_core::enums::MatchStage;

    const UNIGRAMS: &str = "word,count\ni,40\nsaw,12\nthe,90\ncat,20\nsat,9\nsits,4\na,60\n";
    const BIGRAMS: &str = "ngram,count\ncat sits,2\nthe cat,11\na cat,3\n";
    const TRIGRAMS: &str = "ngram,count\nthe cat sat,5\nsaw the cat,2\n";

    fn handle() -> PredictorHandle {
        PredictorHandle::from_readers(
            Cursor::new(UNIGRAMS),
            Cursor::new(BIGRAMS),
            Cursor::new(TRIGRAMS),
            PredictorOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredictorHandle>();
    }

    #[test]
    fn invalid_node_capacity_is_rejected() {
        let options = PredictorOptions {
            node_capacity: 1,
            ..PredictorOptions::default()
        };
        let result = PredictorHandle::from_readers(
            Cursor::new(""),
            Cursor::new(""),
            Cursor::new(""),
            options,
        );
        assert!(matches!(result, Err(HandleError::Options(_))));
    }

    #[test]
    fn missing_corpus_dir_is_a_load_error() {
        let dir = Path::new("/nonexistent/wordcast");
        let result = PredictorHandle::from_dir(dir, PredictorOptions::default());
        assert!(matches!(result, Err(HandleError::Load(LoadError::Io { .. }))));
    }

    #[test]
    fn corpus_files_in_dir() {
        let files = CorpusFiles::in_dir(Path::new("/data"));
        assert_eq!(files.unigrams, Path::new("/data/unigrams.csv"));
        assert_eq!(files.bigrams, Path::new("/data/bigrams.csv"));
        assert_eq!(files.trigrams, Path::new("/data/trigrams.csv"));
        assert!(!files.exist());
    }

    #[test]
    fn trigram_completion() {
        let completion = handle().complete("I saw the cat");
        assert_eq!(completion.source, Some(PredictionSource::Trigram));
        assert_eq!(completion.context, "i saw ");
        assert_eq!(completion.suggestions.len(), 1);
        assert_eq!(completion.suggestions[0].text, "the cat sat");
        assert_eq!(completion.suggestions[0].count, 5);
        assert_eq!(completion.suggestions[0].full_context, "i saw the cat sat");
    }

    #[test]
    fn degraded_completion_folds_word1_into_context() {
        let completion = handle().complete("I saw a cat");
        assert_eq!(completion.source, Some(PredictionSource::BigramBackoff));
        assert_eq!(completion.context, "i saw a ");
        assert_eq!(completion.suggestions[0].text, "cat sits");
        assert_eq!(completion.suggestions[0].full_context, "i saw a cat sits");
    }

    #[test]
    fn single_word_uses_bigrams() {
        let completion = handle().complete("th");
        assert_eq!(completion.source, Some(PredictionSource::Bigram));
        assert_eq!(completion.search.second.as_ref().unwrap().stage, MatchStage::Prefix);
        assert_eq!(completion.search.second_word(), Some("the"));
        assert_eq!(completion.suggestions[0].full_context, "the cat");
    }

    #[test]
    fn no_prediction_returns_fallback() {
        let completion = handle().complete("I saw 42 zzzzzz");
        assert!(!completion.has_suggestions());
        assert_eq!(completion.source, None);
        assert_eq!(completion.context, "i ");
        assert_eq!(completion.fallback, "i saw zzzzzz");
    }

    #[test]
    fn correct_rebuilds_line() {
        assert_eq!(handle().correct("I saww teh catt"), "i saw teh cat ");
    }

    #[test]
    fn duplicate_suggestions_are_presented_once() {
        let mut ranked = wordcast_core::RankedCandidates::new();
        ranked.insert("the cat sat", 5);
        ranked.insert("the cat sat", 5);
        ranked.insert("the cat ran", 2);
        let prediction = Prediction {
            source: PredictionSource::Trigram,
            candidates: ranked,
        };
        let suggestions = present("x ", &prediction);
        let texts: Vec<&str> = suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["the cat sat", "the cat ran"]);
    }
}
