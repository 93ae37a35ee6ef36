//! Observer callback for completed additions
//!
//! The calculator notifies a registered observer synchronously, exactly once
//! per successful `add`, after the sum has been computed and validated.
//! Observers needing mutable state use interior mutability; the callback
//! takes `&self` so observers can be shared behind `Arc`.

use crate::log_info;

/// Single-method callback invoked after each successful addition
pub trait AddObserver: Send + Sync {
    fn add_occurred(&self, expression: &str, sum: i64);
}

/// Observer that reports each computation through the global logging system
pub struct LoggingAddObserver;

impl AddObserver for LoggingAddObserver {
    fn add_occurred(&self, expression: &str, sum: i64) {
        log_info!("Addition completed",
            "expression_length" => expression.len(),
            "sum" => sum
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_observer_does_not_panic() {
        let observer = LoggingAddObserver;
        observer.add_occurred("1,2", 3);
    }

    #[test]
    fn test_observer_is_object_safe() {
        let observer: Box<dyn AddObserver> = Box::new(LoggingAddObserver);
        observer.add_occurred("", 0);
    }
}
