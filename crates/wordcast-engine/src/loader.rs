// Corpus loading: `key,count` CSV records into the lexicon and n-gram indexes

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::lexicon::Lexicon;
use crate::ngram::NgramIndex;

/// Errors raised while reading a corpus file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The corpus file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be read (I/O failure or invalid UTF-8).
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Outcome of loading one corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records handed to the index (repeated keys count each time).
    pub inserted: usize,
    /// Blank, malformed or rejected lines.
    pub skipped: usize,
}

/// Split a record at its first comma into a trimmed key and a count.
///
/// Returns `None` for lines without a comma, with an empty key, or whose
/// count is not a non-negative integer (which covers a CSV header).
fn parse_record(line: &str) -> Option<(&str, u64)> {
    let (key, count) = line.split_once(',')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let count = count.trim().parse().ok()?;
    Some((key, count))
}

/// Feed every well-formed record of `reader` to `accept`, which returns
/// `false` to reject it.
fn for_each_record<R, F>(reader: R, mut accept: F) -> Result<LoadStats, LoadError>
where
    R: BufRead,
    F: FnMut(&str, u64) -> bool,
{
    let mut stats = LoadStats::default();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Parse {
            line: i + 1,
            source,
        })?;
        if line.trim().is_empty() {
            stats.skipped += 1;
            continue;
        }
        match parse_record(&line) {
            Some((key, count)) if accept(key, count) => stats.inserted += 1,
            Some(_) => stats.skipped += 1,
            None => {
                debug!(line = i + 1, record = %line, "skipping malformed corpus record");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

/// Load `word,count` records into `lexicon`.
///
/// Words are lowercased first. Words that still contain characters outside
/// `a`..=`z` are skipped with a warning.
pub fn load_unigrams<R: BufRead>(reader: R, lexicon: &mut Lexicon) -> Result<LoadStats, LoadError> {
    for_each_record(reader, |word, count| {
        let word = word.to_lowercase();
        match lexicon.insert(&word, count) {
            Ok(()) => true,
            Err(err) => {
                warn!(word = %word, error = %err, "skipping unigram");
                false
            }
        }
    })
}

/// Load `ngram,count` records into `index`. Keys are stored as written.
pub fn load_ngrams<R: BufRead>(reader: R, index: &mut NgramIndex) -> Result<LoadStats, LoadError> {
    for_each_record(reader, |key, count| {
        index.insert(key, count);
        true
    })
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// [`load_unigrams`] from a file.
pub fn load_unigrams_from_path(path: &Path, lexicon: &mut Lexicon) -> Result<LoadStats, LoadError> {
    let stats = load_unigrams(open(path)?, lexicon)?;
    info!(
        path = %path.display(),
        inserted = stats.inserted,
        skipped = stats.skipped,
        words = lexicon.len(),
        "loaded unigrams"
    );
    Ok(stats)
}

/// [`load_ngrams`] from a file.
pub fn load_ngrams_from_path(path: &Path, index: &mut NgramIndex) -> Result<LoadStats, LoadError> {
    let stats = load_ngrams(open(path)?, index)?;
    info!(
        path = %path.display(),
        inserted = stats.inserted,
        skipped = stats.skipped,
        keys = index.len(),
        height = index.height(),
        "loaded n-grams"
    );
    Ok(stats)
}
