// Line tokenizer and context split

use wordcast_core::character::{CharType, get_char_type, is_indexable};
use wordcast_core::enums::TokenKind;
use wordcast_core::token::Token;

// ============================================================================
// Token classification
// ============================================================================

/// Classify a finished (already lowercased) token.
fn classify(text: &str) -> TokenKind {
    let Some(first) = text.chars().next() else {
        return TokenKind::Other;
    };
    if first.is_ascii_digit() {
        TokenKind::Number
    } else if is_indexable(text) {
        TokenKind::Word
    } else {
        TokenKind::Other
    }
}

fn flush(buffer: &mut String, tokens: &mut Vec<Token>) {
    if buffer.is_empty() {
        return;
    }
    let text = std::mem::take(buffer);
    let kind = classify(&text);
    tokens.push(Token::new(kind, text, tokens.len()));
}

// ============================================================================
// Public tokenizer API
// ============================================================================

/// Split a raw input line into normalized tokens.
///
/// Whitespace and the delimiter set end a token. Letters are lowercased.
/// A `#` followed by letters or digits forms a hashtag that keeps its
/// spelling; a lone `#` is dropped. Digits pull in the run of digits and
/// dots that follows them, so `3.14` stays one token. Characters outside
/// ASCII are dropped. Other ASCII symbols stay inside their token, which
/// then classifies as [`TokenKind::Other`].
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match get_char_type(c) {
            CharType::Delimiter => flush(&mut buffer, &mut tokens),
            CharType::Hash => {
                flush(&mut buffer, &mut tokens);
                let mut tag = String::from('#');
                while let Some(&next) = chars.peek() {
                    if !next.is_ascii_alphanumeric() {
                        break;
                    }
                    tag.push(next);
                    chars.next();
                }
                if tag.len() > 1 {
                    tokens.push(Token::new(TokenKind::Hashtag, tag, tokens.len()));
                }
            }
            CharType::NonAscii => {}
            CharType::Digit => {
                buffer.push(c);
                while let Some(&next) = chars.peek() {
                    if !(next.is_ascii_digit() || next == '.') {
                        break;
                    }
                    buffer.push(next);
                    chars.next();
                }
            }
            CharType::Letter | CharType::Other => buffer.push(c.to_ascii_lowercase()),
        }
    }
    flush(&mut buffer, &mut tokens);
    tokens
}

// ============================================================================
// Context split
// ============================================================================

/// A tokenized line split into the prediction inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineContext {
    /// Tokens before `word1`, in input order.
    pub context: Vec<Token>,
    /// Second-to-last word token.
    pub word1: Option<Token>,
    /// Last word token.
    pub word2: Option<Token>,
}

impl LineContext {
    /// Raw text of `word1`.
    pub fn word1_text(&self) -> Option<&str> {
        self.word1.as_ref().map(|t| t.text.as_str())
    }

    /// Raw text of `word2`.
    pub fn word2_text(&self) -> Option<&str> {
        self.word2.as_ref().map(|t| t.text.as_str())
    }
}

/// Pop tokens off the end until a word turns up. Non-word tokens passed on
/// the way are discarded.
fn pop_word(tokens: &mut Vec<Token>) -> Option<Token> {
    while let Some(token) = tokens.pop() {
        if token.is_word() {
            return Some(token);
        }
    }
    None
}

/// Take the last two word tokens off `tokens`.
///
/// Trailing non-word tokens (numbers, hashtags, mixed tokens) are skipped
/// and dropped while looking for `word2` and then `word1`. Whatever
/// precedes `word1` becomes the context.
pub fn split_context(mut tokens: Vec<Token>) -> LineContext {
    let word2 = pop_word(&mut tokens);
    let word1 = if word2.is_some() {
        pop_word(&mut tokens)
    } else {
        None
    };
    LineContext {
        context: tokens,
        word1,
        word2,
    }
}

/// Tokenize `line` and split it into context and trailing words.
pub fn parse_line(line: &str) -> LineContext {
    split_context(tokenize(line))
}

// ============================================================================
// Tests
// ============================================================================
