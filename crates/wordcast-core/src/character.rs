// Character classification for the indexed alphabet and the tokenizer

// ---------------------------------------------------------------------------
// Indexed alphabet
// ---------------------------------------------------------------------------

/// Number of symbols in the indexed alphabet (`a`..=`z`).
pub const ALPHABET_SIZE: usize = 26;

/// Characters that separate tokens in addition to whitespace.
pub const DELIMITERS: &str = " .,/?;:{}[]~`!|$%&*()_-+=^'\"\t\n";

/// Map a character to its slot in the indexed alphabet.
///
/// Only lowercase ASCII letters are indexed; everything else returns `None`.
#[inline]
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_lowercase() {
        Some(c as usize - 'a' as usize)
    } else {
        None
    }
}

/// Inverse of [`letter_index`].
///
/// Returns `None` for indices outside the alphabet.
#[inline]
pub fn letter_at(index: usize) -> Option<char> {
    if index < ALPHABET_SIZE {
        Some((b'a' + index as u8) as char)
    } else {
        None
    }
}

/// Returns the first character of `word` that is outside the indexed alphabet.
pub fn first_unindexed(word: &str) -> Option<char> {
    word.chars().find(|&c| letter_index(c).is_none())
}

/// Returns `true` if `word` is non-empty and made of indexed letters only.
pub fn is_indexable(word: &str) -> bool {
    !word.is_empty() && first_unindexed(word).is_none()
}

// ---------------------------------------------------------------------------
// Tokenizer character classes
// ---------------------------------------------------------------------------

/// Character type classification used by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharType {
    /// ASCII letter (either case).
    Letter,
    /// ASCII digit.
    Digit,
    /// Whitespace or one of [`DELIMITERS`].
    Delimiter,
    /// `#`, which starts a hashtag.
    Hash,
    /// Anything outside ASCII (emoji, accented letters, ...).
    NonAscii,
    /// Remaining ASCII symbols.
    Other,
}

/// Returns the character type for a given character.
pub fn get_char_type(c: char) -> CharType {
    if !c.is_ascii() {
        return CharType::NonAscii;
    }
    if c == '#' {
        return CharType::Hash;
    }
    if c.is_ascii_whitespace() || DELIMITERS.contains(c) {
        return CharType::Delimiter;
    }
    if c.is_ascii_alphabetic() {
        return CharType::Letter;
    }
    if c.is_ascii_digit() {
        return CharType::Digit;
    }
    CharType::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_index_covers_lowercase_ascii() {
        assert_eq!(letter_index('a'), Some(0));
        assert_eq!(letter_index('z'), Some(25));
        assert_eq!(letter_index('A'), None);
        assert_eq!(letter_index('1'), None);
        assert_eq!(letter_index('\u{00E4}'), None);
    }

    #[test]
    fn letter_at_is_inverse_of_letter_index() {
        for c in 'a'..='z' {
            assert_eq!(letter_at(letter_index(c).unwrap()), Some(c));
        }
        assert_eq!(letter_at(ALPHABET_SIZE), None);
    }

    #[test]
    fn indexable_words() {
        assert!(is_indexable("hello"));
        assert!(!is_indexable(""));
        assert!(!is_indexable("Hello"));
        assert!(!is_indexable("don't"));
        assert_eq!(first_unindexed("ab3c"), Some('3'));
    }

    #[test]
    fn char_types() {
        assert_eq!(get_char_type('a'), CharType::Letter);
        assert_eq!(get_char_type('Q'), CharType::Letter);
        assert_eq!(get_char_type('7'), CharType::Digit);
        assert_eq!(get_char_type(' '), CharType::Delimiter);
        assert_eq!(get_char_type('\t'), CharType::Delimiter);
        assert_eq!(get_char_type(','), CharType::Delimiter);
        assert_eq!(get_char_type('\''), CharType::Delimiter);
        assert_eq!(get_char_type('#'), CharType::Hash);
        assert_eq!(get_char_type('@'), CharType::Other);
        assert_eq!(get_char_type('\u{1F600}'), CharType::NonAscii);
    }
}
