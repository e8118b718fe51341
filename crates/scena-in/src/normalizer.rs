//! Identifier normalization for table cells.
//!
//! Turns free text written in a table into identifier form:
//! - separators (anything but letters, digits and `_`) are dropped
//! - every word after the first is capitalized
//! - class-style names capitalize the first letter, method-style names
//!   lower-case it

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of characters that separate words
    static ref SEPARATORS: Regex = Regex::new(r"[^\p{L}\p{N}_]+").unwrap();
}

/// Normalize to a class-style identifier (`"add and"` -> `"AddAnd"`,
/// `"greet"` -> `"Greet"`).
///
/// Qualified names (an interior `.`) and names containing `$` are left
/// untouched.
pub fn class_name(name: &str) -> String {
    if has_dot_before_end(name) || name.contains('$') {
        return name.to_string();
    }
    normalize(name, true)
}

/// Normalize to a method-style identifier (`"total sum?"` -> `"totalSum"`,
/// `"Result?"` -> `"result"`)
pub fn method_name(name: &str) -> String {
    normalize(name, false)
}

fn normalize(name: &str, class_style: bool) -> String {
    let mut result = String::with_capacity(name.len());
    for word in SEPARATORS.split(name).filter(|w| !w.is_empty()) {
        if !result.is_empty() || class_style {
            push_capitalized(&mut result, word);
        } else {
            push_lowercased_first(&mut result, word);
        }
    }
    result
}

fn push_lowercased_first(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
        out.push_str(chars.as_str());
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

fn has_dot_before_end(name: &str) -> bool {
    name.find('.').map_or(false, |i| i != name.len() - 1)
}
