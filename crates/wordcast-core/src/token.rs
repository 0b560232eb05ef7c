// Token type produced by the tokenizer

use crate::enums::TokenKind;

/// A normalized token of user input.
///
/// Word tokens are already lowercased; hashtags and numbers keep their
/// original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,

    /// The normalized text of this token.
    pub text: String,

    /// Index of this token within its line (0-based, in token units).
    pub pos: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// Shorthand for a word token.
    pub fn word(text: impl Into<String>, pos: usize) -> Self {
        Self::new(TokenKind::Word, text, pos)
    }

    /// Returns `true` if this token may be resolved against the lexicon.
    pub fn is_word(&self) -> bool {
        self.kind.is_word()
    }
}
