//! Summation and business rules over tokenized expressions
//!
//! `StringCalculator` consumes the token sequence produced by an injected
//! tokenizer, converts tokens to integers and enforces the business rules:
//! negative addends are rejected in one aggregated error, and values over
//! the configured ceiling are silently excluded from the sum. The calculator
//! tracks how many times `add` has been invoked and notifies an optional
//! observer once per successful addition.

mod error;
mod observer;

pub use error::CalculatorError;
pub use observer::{AddObserver, LoggingAddObserver};

use crate::config::compile_time::calculator::VALUE_CEILING;
use crate::config::runtime::CalculatorPreferences;
use crate::logging::codes;
use crate::tokenizer::Tokenizer;
use crate::{log_debug, log_error, log_success};
use std::sync::Arc;

/// String calculator with an injected tokenizer and optional add observer
pub struct StringCalculator {
    tokenizer: Arc<dyn Tokenizer>,
    observer: Option<Arc<dyn AddObserver>>,
    called_count: usize,
    preferences: CalculatorPreferences,
}

impl StringCalculator {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            observer: None,
            called_count: 0,
            preferences: CalculatorPreferences::default(),
        }
    }

    pub fn with_observer(tokenizer: Arc<dyn Tokenizer>, observer: Arc<dyn AddObserver>) -> Self {
        Self {
            tokenizer,
            observer: Some(observer),
            called_count: 0,
            preferences: CalculatorPreferences::default(),
        }
    }

    pub fn set_preferences(&mut self, preferences: CalculatorPreferences) {
        self.preferences = preferences;
    }

    /// Number of times `add` has been invoked, including failed calls
    pub fn called_count(&self) -> usize {
        self.called_count
    }

    /// Sum the numbers in an expression.
    ///
    /// Tokenizes through the injected tokenizer, converts every token to an
    /// integer, rejects negative addends with one aggregated error and
    /// excludes values over the ceiling from the sum. The observer, if any,
    /// is notified exactly once on success.
    pub fn add(&mut self, expression: &str) -> Result<i64, CalculatorError> {
        self.called_count += 1;

        let tokens = self.tokenizer.tokenize(expression);

        let mut addends: Vec<(String, i64)> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let value: i64 = match token.parse() {
                Ok(value) => value,
                Err(_) => {
                    let error = CalculatorError::InvalidAddend { text: token };
                    log_error!(error.error_code(), "Token is not an integer",
                        "error" => error
                    );
                    return Err(error);
                }
            };
            addends.push((token, value));
        }

        let negatives: Vec<String> = addends
            .iter()
            .filter(|(_, value)| *value < 0)
            .map(|(text, _)| text.clone())
            .collect();

        if !negatives.is_empty() {
            let error = CalculatorError::NegativesNotAllowed { values: negatives };
            log_error!(error.error_code(), "Expression contains negative addends",
                "error" => error
            );
            return Err(error);
        }

        let mut sum = 0i64;
        let mut ignored = 0usize;
        for (_, value) in &addends {
            if *value > VALUE_CEILING {
                ignored += 1;
                if self.preferences.log_ignored_addends {
                    log_debug!("Addend over ceiling ignored",
                        "value" => value,
                        "ceiling" => VALUE_CEILING
                    );
                }
            } else {
                sum += value;
            }
        }

        log_success!(codes::success::SUM_COMPLETE, "Expression summed",
            "addends" => addends.len(),
            "ignored" => ignored,
            "sum" => sum
        );

        if let Some(observer) = &self.observer {
            if self.preferences.log_observer_notifications {
                log_debug!("Notifying add observer", "sum" => sum);
            }
            observer.add_occurred(expression, sum);
        }

        Ok(sum)
    }
}

// ============================================================================
// MODULE API
// ============================================================================

/// Sum an expression with a default-configured calculator and tokenizer
pub fn add(expression: &str) -> Result<i64, CalculatorError> {
    let tokenizer = Arc::new(crate::tokenizer::create_tokenizer());
    StringCalculator::new(tokenizer).add(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::DelimiterTokenizer;
    use assert_matches::assert_matches;
    use std::sync::Mutex;

    /// Test double returning a canned token sequence and recording calls
    struct MockTokenizer {
        canned: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTokenizer {
        fn returning(tokens: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                canned: tokens.iter().map(|t| t.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_expression(&self) -> Option<String> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    impl Tokenizer for MockTokenizer {
        fn tokenize(&self, expression: &str) -> Vec<String> {
            self.calls.lock().unwrap().push(expression.to_string());
            self.canned.clone()
        }
    }

    /// Test double recording observer notifications
    #[derive(Default)]
    struct RecordingObserver {
        notifications: Mutex<Vec<(String, i64)>>,
    }

    impl RecordingObserver {
        fn notification_count(&self) -> usize {
            self.notifications.lock().unwrap().len()
        }

        fn last_notification(&self) -> Option<(String, i64)> {
            self.notifications.lock().unwrap().last().cloned()
        }
    }

    impl AddObserver for RecordingObserver {
        fn add_occurred(&self, expression: &str, sum: i64) {
            self.notifications
                .lock()
                .unwrap()
                .push((expression.to_string(), sum));
        }
    }

    fn add_tokens(tokens: &[&str]) -> Result<i64, CalculatorError> {
        let tokenizer = MockTokenizer::returning(tokens);
        StringCalculator::new(tokenizer).add("")
    }

    #[test]
    fn test_sums_tokens_returned_by_tokenizer() {
        assert_eq!(add_tokens(&[]).unwrap(), 0);
        assert_eq!(add_tokens(&["1"]).unwrap(), 1);
        assert_eq!(add_tokens(&["10"]).unwrap(), 10);
        assert_eq!(add_tokens(&["0"]).unwrap(), 0);
        assert_eq!(add_tokens(&["1", "2"]).unwrap(), 3);
        assert_eq!(add_tokens(&["10", "20"]).unwrap(), 30);
        assert_eq!(add_tokens(&["1", "2", "3", "42"]).unwrap(), 48);
    }

    #[test]
    fn test_calls_tokenizer_with_raw_expression() {
        let tokenizer = MockTokenizer::returning(&["1", "2"]);
        let mut calculator = StringCalculator::new(tokenizer.clone());

        calculator.add("//;\n1;2").unwrap();

        assert_eq!(tokenizer.call_count(), 1);
        assert_eq!(tokenizer.last_expression().unwrap(), "//;\n1;2");
    }

    #[test]
    fn test_calling_add_twice_calls_tokenizer_twice() {
        let tokenizer = MockTokenizer::returning(&["1"]);
        let mut calculator = StringCalculator::new(tokenizer.clone());

        calculator.add("1").unwrap();
        calculator.add("2").unwrap();

        assert_eq!(tokenizer.call_count(), 2);
    }

    #[test]
    fn test_negative_addend_rejected_with_message() {
        let error = add_tokens(&["-1"]).unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -1");

        let error = add_tokens(&["-42"]).unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -42");
    }

    #[test]
    fn test_all_negatives_aggregated_in_order() {
        let error = add_tokens(&["-1", "1", "-2"]).unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -1 -2");

        let error = add_tokens(&["1", "-2", "-4", "8"]).unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -2 -4");
    }

    #[test]
    fn test_invalid_addend_is_fatal() {
        let error = add_tokens(&["1", "abc", "3"]).unwrap_err();
        assert_matches!(error, CalculatorError::InvalidAddend { ref text } if text == "abc");
    }

    #[test]
    fn test_ignores_addends_over_ceiling() {
        assert_eq!(add_tokens(&["1001"]).unwrap(), 0);
        assert_eq!(add_tokens(&["2222"]).unwrap(), 0);
        assert_eq!(add_tokens(&["2", "1001"]).unwrap(), 2);
        assert_eq!(add_tokens(&["1000"]).unwrap(), 1000);
    }

    #[test]
    fn test_called_count_tracks_invocations() {
        let tokenizer = MockTokenizer::returning(&[]);
        let mut calculator = StringCalculator::new(tokenizer);

        assert_eq!(calculator.called_count(), 0);
        calculator.add("").unwrap();
        assert_eq!(calculator.called_count(), 1);
        calculator.add("").unwrap();
        assert_eq!(calculator.called_count(), 2);
    }

    #[test]
    fn test_called_count_includes_failed_calls() {
        let tokenizer = MockTokenizer::returning(&["-1"]);
        let mut calculator = StringCalculator::new(tokenizer);

        assert!(calculator.add("").is_err());
        assert_eq!(calculator.called_count(), 1);
    }

    #[test]
    fn test_observer_not_called_before_add() {
        let tokenizer = MockTokenizer::returning(&[]);
        let observer = Arc::new(RecordingObserver::default());
        let _calculator = StringCalculator::with_observer(tokenizer, observer.clone());

        assert_eq!(observer.notification_count(), 0);
    }

    #[test]
    fn test_observer_called_once_per_add() {
        let tokenizer = MockTokenizer::returning(&[]);
        let observer = Arc::new(RecordingObserver::default());
        let mut calculator = StringCalculator::with_observer(tokenizer, observer.clone());

        calculator.add("").unwrap();
        assert_eq!(observer.notification_count(), 1);

        calculator.add("").unwrap();
        assert_eq!(observer.notification_count(), 2);
    }

    #[test]
    fn test_observer_receives_expression_and_sum() {
        let tokenizer = MockTokenizer::returning(&["1", "2", "3", "4"]);
        let observer = Arc::new(RecordingObserver::default());
        let mut calculator = StringCalculator::with_observer(tokenizer, observer.clone());

        calculator.add("1,2,3,4").unwrap();

        let (expression, sum) = observer.last_notification().unwrap();
        assert_eq!(expression, "1,2,3,4");
        assert_eq!(sum, 10);
    }

    #[test]
    fn test_observer_not_notified_on_failure() {
        let tokenizer = MockTokenizer::returning(&["-1"]);
        let observer = Arc::new(RecordingObserver::default());
        let mut calculator = StringCalculator::with_observer(tokenizer, observer.clone());

        assert!(calculator.add("").is_err());
        assert_eq!(observer.notification_count(), 0);
    }

    // ------------------------------------------------------------------
    // End-to-end behavior through the real tokenizer
    // ------------------------------------------------------------------

    fn add_real(expression: &str) -> Result<i64, CalculatorError> {
        let tokenizer = Arc::new(DelimiterTokenizer::new());
        StringCalculator::new(tokenizer).add(expression)
    }

    #[test]
    fn test_add_with_default_delimiters() {
        assert_eq!(add_real("").unwrap(), 0);
        assert_eq!(add_real("1").unwrap(), 1);
        assert_eq!(add_real("1,2").unwrap(), 3);
        assert_eq!(add_real("1,2,3,42").unwrap(), 48);
        assert_eq!(add_real("1\n2").unwrap(), 3);
        assert_eq!(add_real("1\n2,3").unwrap(), 6);
    }

    #[test]
    fn test_add_with_declared_delimiters() {
        assert_eq!(add_real("//;\n1;2").unwrap(), 3);
        assert_eq!(add_real("//\n\n1\n2").unwrap(), 3);
        assert_eq!(add_real("//0\n102").unwrap(), 3);
        assert_eq!(add_real("//[***]\n1***2***3").unwrap(), 6);
        assert_eq!(add_real("//[*][%%]\n1*2%%3").unwrap(), 6);
        assert_eq!(add_real("//[]\n1,2,3").unwrap(), 6);
        assert_eq!(add_real("//[A,Z]\n1A,Z2A,Z3").unwrap(), 6);
    }

    #[test]
    fn test_add_rejects_negatives_end_to_end() {
        let error = add_real("-1").unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -1");

        let error = add_real("-1,1,-2").unwrap_err();
        assert_eq!(error.to_string(), "negatives not allowed: -1 -2");
    }

    #[test]
    fn test_add_ceiling_end_to_end() {
        assert_eq!(add_real("1001").unwrap(), 0);
        assert_eq!(add_real("2,1001").unwrap(), 2);
        assert_eq!(add_real("1000").unwrap(), 1000);
    }

    #[test]
    fn test_module_level_add() {
        assert_eq!(add("1,2,3").unwrap(), 6);
    }
}
