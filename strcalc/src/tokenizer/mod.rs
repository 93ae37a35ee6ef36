//! Expression tokenization module
//!
//! Exposes the `Tokenizer` abstraction consumed by the calculator and the
//! production `DelimiterTokenizer` implementation. Tokenization is pure and
//! side-effect-free; a single tokenizer instance may be shared freely across
//! threads.

pub mod splitter;

pub use splitter::{DelimiterTokenizer, TokenizeMetrics, CANONICAL_SEPARATOR};

use crate::config::runtime::TokenizerPreferences;

/// Tokenizer abstraction injected into the calculator.
///
/// Implementations take the raw expression (header included) and return the
/// ordered sequence of non-empty token strings. Test doubles can substitute
/// canned sequences without running the real header/splitting logic.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, expression: &str) -> Vec<String>;
}

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize an expression with a default-configured tokenizer
pub fn tokenize(expression: &str) -> Vec<String> {
    DelimiterTokenizer::new().tokenize(expression)
}

/// Create a new tokenizer with default preferences
pub fn create_tokenizer() -> DelimiterTokenizer {
    DelimiterTokenizer::new()
}

/// Create a tokenizer with custom runtime preferences
pub fn create_tokenizer_with_preferences(preferences: TokenizerPreferences) -> DelimiterTokenizer {
    DelimiterTokenizer::with_preferences(preferences)
}
