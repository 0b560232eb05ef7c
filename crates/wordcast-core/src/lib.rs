//! Shared types and utilities for the wordcast prediction engine.
//!
//! # Architecture
//!
//! - [`candidate`] -- Bounded top-k ranking buffer (`RankedCandidates`)
//! - [`distance`] -- Levenshtein distance and normalized ratio
//! - [`character`] -- Indexed alphabet and tokenizer character classes
//! - [`enums`] -- Token kinds, backoff stages, n-gram orders
//! - [`token`] -- Normalized input token
//! - [`error`] -- Core error type

pub mod candidate;
pub mod character;
pub mod distance;
pub mod enums;
pub mod error;
pub mod token;

pub use candidate::{Candidate, Eviction, RankedCandidates};
pub use error::WordcastError;
