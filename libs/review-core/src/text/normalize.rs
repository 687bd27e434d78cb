//! Answer normalization pipeline.
//!
//! Every validator runs user input and expected answers through
//! [`normalize`] before comparing, so fuzziness rules only ever see
//! canonical text.

use serde::{Deserialize, Serialize};

/// Options controlling how far normalization goes. The defaults match the
/// most permissive text comparison (case and whitespace insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Lowercase the input.
    pub fold_case: bool,
    /// Collapse runs of whitespace to a single space (leading/trailing
    /// whitespace is always trimmed regardless of this flag).
    pub collapse_whitespace: bool,
    /// Strip punctuation characters entirely.
    pub strip_punctuation: bool,
    /// Fold full-width ASCII forms to half-width and katakana to hiragana.
    pub fold_scripts: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            fold_case: true,
            collapse_whitespace: true,
            strip_punctuation: false,
            fold_scripts: false,
        }
    }
}

impl NormalizeOptions {
    /// Strict comparison: trim only.
    pub fn exact() -> Self {
        Self {
            fold_case: false,
            collapse_whitespace: true,
            strip_punctuation: false,
            fold_scripts: false,
        }
    }

    /// Japanese-script comparison: case folding plus width and kana folding.
    pub fn japanese() -> Self {
        Self {
            fold_case: true,
            collapse_whitespace: true,
            strip_punctuation: true,
            fold_scripts: true,
        }
    }
}

/// Run the normalization pipeline over a string.
pub fn normalize(input: &str, options: &NormalizeOptions) -> String {
    let mut s = if options.collapse_whitespace {
        input.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        input.trim().to_string()
    };

    if options.fold_case {
        s = s.to_lowercase();
    }

    if options.strip_punctuation {
        s = s.chars().filter(|c| !is_punctuation(*c)).collect();
    }

    if options.fold_scripts {
        s = fold_width(&s);
        s = crate::text::kana::katakana_to_hiragana(&s);
    }

    s
}

/// ASCII and common CJK punctuation.
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '。' | '、' | '・' | '「' | '」' | '！' | '？' | '　')
}

/// Fold full-width ASCII variants (U+FF01..U+FF5E) to their half-width forms.
fn fold_width(s: &str) -> String {
    s.chars()
        .map(|c| {
            let code = c as u32;
            if (0xFF01..=0xFF5E).contains(&code) {
                char::from_u32(code - 0xFEE0).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
