// Internal modules
pub mod calculator;
pub mod config;
pub mod delimiters;
pub mod header;
pub mod input;
#[macro_use]
pub mod logging;
pub mod tokenizer;

// Re-export key types for library consumers
pub use calculator::{add, AddObserver, CalculatorError, LoggingAddObserver, StringCalculator};
pub use delimiters::DelimiterSet;
pub use tokenizer::{DelimiterTokenizer, Tokenizer};
