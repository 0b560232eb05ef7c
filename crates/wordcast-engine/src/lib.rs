//! Lexicon, n-gram index and backoff predictor.
//!
//! Given a partial sentence, every word is resolved against a unigram
//! lexicon (exact, then prefix, then fuzzy) and the two trailing words are
//! used to predict the next word from trigram counts, backing off to
//! bigram counts when the trigram index has nothing.
//!
//! # Architecture
//!
//! - [`lexicon`] -- Trie of unigram counts with exact/prefix/fuzzy lookup
//! - [`ngram`] -- Left-biased B+ tree of bigram or trigram counts
//! - [`resolver`] -- Single-token backoff chain over the lexicon
//! - [`predictor`] -- Trigram -> bigram prediction
//! - [`processor`] -- Context correction
//! - [`options`] -- Tunables shared by resolver, predictor and indexes
//! - `loader` -- `key,count` corpus loading (feature `load`)
//! - `tokenizer` -- Line tokenizer and context split (feature `tokenize`)
//! - `handle` -- Owning handle running the whole pipeline (feature `handle`)

pub mod lexicon;
pub mod ngram;
pub mod options;
pub mod predictor;
pub mod processor;
pub mod resolver;

#[cfg(feature = "load")]
pub mod loader;

#[cfg(feature = "tokenize")]
pub mod tokenizer;

#[cfg(feature = "handle")]
pub mod handle;

pub use lexicon::Lexicon;
pub use ngram::{BigramMatch, NgramIndex};
pub use options::PredictorOptions;
pub use predictor::{Prediction, Predictor};
pub use resolver::{Resolution, Resolver, SearchSet};

#[cfg(feature = "handle")]
pub use handle::{Completion, CorpusFiles, HandleError, PredictorHandle, Suggestion};
