//! Calculator error types

use crate::logging::codes;

/// Summation errors with aggregated negative reporting
#[derive(Debug, Clone, thiserror::Error)]
pub enum CalculatorError {
    /// All negative addends of the call, space-separated in their original
    /// textual form
    #[error("negatives not allowed: {}", .values.join(" "))]
    NegativesNotAllowed { values: Vec<String> },

    #[error("invalid addend: '{text}'")]
    InvalidAddend { text: String },
}

impl CalculatorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            CalculatorError::NegativesNotAllowed { .. } => codes::calculator::NEGATIVE_ADDEND,
            CalculatorError::InvalidAddend { .. } => codes::calculator::INVALID_ADDEND,
        }
    }

    /// Get error severity from the code registry
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}
