//! Core expression splitting implementation
//!
//! Splits an expression body into numeric tokens using the full delimiter
//! set. Because delimiters may overlap (one may be a prefix or substring of
//! another, and declared delimiters may collide with the defaults), every
//! delimiter is first substituted for one canonical separator, longest
//! delimiter first, and the normalized text is split in a single pass.

use crate::config::runtime::TokenizerPreferences;
use crate::delimiters::DelimiterSet;
use crate::header::{self, HeaderForm};
use crate::logging::codes;
use crate::tokenizer::Tokenizer;
use crate::{log_debug, log_success};

/// The single substitute delimiter used during normalization
pub const CANONICAL_SEPARATOR: &str = ",";

/// Per-call tokenization metrics
#[derive(Debug, Clone)]
pub struct TokenizeMetrics {
    pub header_form: HeaderForm,
    pub header_size: usize,
    pub declared_delimiters: usize,
    pub replacements: usize,
    pub token_count: usize,
    pub dropped_fragments: usize,
}

/// Production tokenizer: header recognition followed by normalize-and-split
#[derive(Debug, Clone)]
pub struct DelimiterTokenizer {
    preferences: TokenizerPreferences,
}

impl DelimiterTokenizer {
    pub fn new() -> Self {
        Self {
            preferences: TokenizerPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: TokenizerPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &TokenizerPreferences {
        &self.preferences
    }

    /// Tokenize an expression and report per-call metrics.
    ///
    /// Never fails: every input, including empty text and malformed headers,
    /// yields a defined (possibly empty) token sequence.
    pub fn tokenize_with_metrics(&self, expression: &str) -> (Vec<String>, TokenizeMetrics) {
        let (scan, body) = header::split_header(expression);

        if self.preferences.log_header_detection {
            log_debug!("Header scan complete",
                "form" => scan.form.as_str(),
                "header_size" => scan.header_size,
                "declared" => scan.delimiters.declared_count()
            );
        }

        let (normalized, replacements) = self.normalize(body, &scan.delimiters);
        let (tokens, dropped_fragments) = split_on_separator(&normalized);

        let metrics = TokenizeMetrics {
            header_form: scan.form,
            header_size: scan.header_size,
            declared_delimiters: scan.delimiters.declared_count(),
            replacements,
            token_count: tokens.len(),
            dropped_fragments,
        };

        (tokens, metrics)
    }

    /// Substitute every delimiter occurrence in the body with the canonical
    /// separator, longest delimiter first so a shorter delimiter can never
    /// fragment a longer one's match.
    fn normalize(&self, body: &str, delimiters: &DelimiterSet) -> (String, usize) {
        let mut buffer = body.to_string();
        let mut replacements = 0;

        for delimiter in delimiters.longest_first() {
            let (next, count) = substitute(&buffer, delimiter);
            buffer = next;
            replacements += count;

            if self.preferences.log_normalization_steps && count > 0 {
                log_debug!("Delimiter substituted",
                    "delimiter" => format!("{:?}", delimiter),
                    "occurrences" => count
                );
            }
        }

        (buffer, replacements)
    }
}

impl Default for DelimiterTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, expression: &str) -> Vec<String> {
        let (tokens, metrics) = self.tokenize_with_metrics(expression);

        if self.preferences.collect_detailed_metrics {
            log_success!(codes::success::TOKENIZATION_COMPLETE,
                "Expression tokenized",
                "header_form" => metrics.header_form.as_str(),
                "declared_delimiters" => metrics.declared_delimiters,
                "replacements" => metrics.replacements,
                "tokens" => metrics.token_count,
                "dropped_fragments" => metrics.dropped_fragments
            );
        }

        tokens
    }
}

/// Replace every literal occurrence of `delimiter` with the canonical
/// separator. Each search resumes one byte past the previous replacement's
/// start, tolerating matches that substitution could newly expose. The resume
/// offset stays on a character boundary because the separator is one byte.
fn substitute(input: &str, delimiter: &str) -> (String, usize) {
    debug_assert!(!delimiter.is_empty(), "delimiter sets never hold empties");

    let mut buffer = input.to_string();
    let mut replacements = 0;
    let mut search_from = 0;

    while let Some(found) = buffer[search_from..].find(delimiter) {
        let at = search_from + found;
        buffer.replace_range(at..at + delimiter.len(), CANONICAL_SEPARATOR);
        replacements += 1;
        search_from = at + CANONICAL_SEPARATOR.len();
    }

    (buffer, replacements)
}

/// Split normalized text on the canonical separator, dropping empty
/// fragments. Empty input yields no tokens.
fn split_on_separator(normalized: &str) -> (Vec<String>, usize) {
    if normalized.is_empty() {
        return (Vec::new(), 0);
    }

    let mut tokens = Vec::new();
    let mut dropped = 0;

    for fragment in normalized.split(CANONICAL_SEPARATOR) {
        if fragment.is_empty() {
            dropped += 1;
        } else {
            tokens.push(fragment.to_string());
        }
    }

    (tokens, dropped)
}
