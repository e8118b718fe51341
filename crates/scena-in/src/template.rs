//! Parameterized scenario names.
//!
//! A name such as `add _ and _` is held as a list of literal and placeholder
//! tokens. The registered name, the invocation pattern and the placeholder
//! count are all derived from that one list.
//!
//! A placeholder is an underscore standing alone: preceded by a non-word
//! character and followed by a non-word character or the end of the text.
//! Word characters are ASCII letters, digits and `_`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    Literal(String),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTemplate {
    tokens: Vec<Token>,
}

impl NameTemplate {
    /// Tokenize a raw name cell
    pub fn parse(raw: &str) -> Self {
        let chars: Vec<char> = raw.chars().collect();
        let mut tokens = Vec::new();
        let mut literal = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if c == '_' && is_standalone(&chars, i) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder);
            } else {
                literal.push(c);
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        NameTemplate { tokens }
    }

    /// Template for an alternating header: `frag1 _ frag2 _ ...`
    pub fn alternating<S: AsRef<str>>(fragments: &[S]) -> Self {
        let mut tokens = Vec::new();
        for (i, fragment) in fragments.iter().enumerate() {
            let literal = if i > 0 {
                format!(" {} ", fragment.as_ref())
            } else {
                format!("{} ", fragment.as_ref().trim_start())
            };
            tokens.push(Token::Literal(literal));
            tokens.push(Token::Placeholder);
        }
        if let Some(Token::Literal(first)) = tokens.first() {
            if first.trim().is_empty() {
                tokens.remove(0);
            }
        }
        NameTemplate { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn placeholder_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Placeholder))
            .count()
    }

    pub fn is_parameterized(&self) -> bool {
        self.placeholder_count() > 0
    }

    /// Name text with each placeholder, and the separator before it,
    /// collapsed to a single space. Trimmed.
    pub fn unparameterized(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(s) => text.push_str(s),
                Token::Placeholder => {
                    text.pop();
                    text.push(' ');
                }
            }
        }
        text.trim().to_string()
    }

    /// Anchored regex source: literals escaped, placeholders as `(.*)`
    pub fn pattern(&self) -> String {
        let mut pattern = String::from("^");
        for token in &self.tokens {
            match token {
                Token::Literal(s) => pattern.push_str(&regex::escape(s)),
                Token::Placeholder => pattern.push_str("(.*)"),
            }
        }
        pattern.push('$');
        pattern
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_standalone(chars: &[char], i: usize) -> bool {
    let before = i > 0 && !is_word(chars[i - 1]);
    let after = chars.get(i + 1).map_or(true, |&c| !is_word(c));
    before && after
}
