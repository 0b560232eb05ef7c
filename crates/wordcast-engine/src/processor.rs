// Context correction: resolve every word of the context

use wordcast_core::token::Token;

use crate::resolver::{Resolution, Resolver};

/// One context token and what it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    pub token: Token,
    /// `None` for non-word tokens and for words the lexicon cannot resolve.
    pub resolution: Option<Resolution>,
}

impl Correction {
    /// Text that replaces the token in the corrected line.
    pub fn text(&self) -> &str {
        match &self.resolution {
            Some(resolution) => resolution.word(),
            None => &self.token.text,
        }
    }
}

/// Resolve each word token in `tokens`; non-word tokens pass through.
pub fn correct_tokens(tokens: &[Token], resolver: &Resolver<'_>) -> Vec<Correction> {
    tokens
        .iter()
        .map(|token| Correction {
            token: token.clone(),
            resolution: if token.is_word() {
                resolver.resolve(&token.text)
            } else {
                None
            },
        })
        .collect()
}

/// Rebuild a corrected context string: each word token replaced by its
/// best resolution (or kept as typed), every token followed by one space.
pub fn correct(tokens: &[Token], resolver: &Resolver<'_>) -> String {
    join_corrections(&correct_tokens(tokens, resolver))
}

/// Join corrections with single spaces plus a trailing space.
pub fn join_corrections(corrections: &[Correction]) -> String {
    let mut line = String::new();
    for correction in corrections {
        line.push_str(correction.text());
        line.push(' ');
    }
    line
}
