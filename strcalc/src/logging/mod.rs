//! Global logging module for strcalc
//!
//! Provides thread-safe global logging with per-expression context and a
//! clean macro interface.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static EXPRESSION_CONTEXT: RefCell<Option<ExpressionContext>> = RefCell::new(None);
}

/// Context describing the expression currently being processed on this thread
#[derive(Debug, Clone)]
pub struct ExpressionContext {
    /// Truncated copy of the raw expression for log readability
    pub preview: String,
    /// Length of the full expression in bytes
    pub length: usize,
}

impl ExpressionContext {
    const PREVIEW_LIMIT: usize = 40;

    pub fn new(expression: &str) -> Self {
        let preview = if expression.chars().count() > Self::PREVIEW_LIMIT {
            let head: String = expression.chars().take(Self::PREVIEW_LIMIT).collect();
            format!("{}...", head)
        } else {
            expression.to_string()
        };

        Self {
            preview: preview.replace('\n', "\\n"),
            length: expression.len(),
        }
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    let event = events::LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );
    logging_service.log_event(event);

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// EXPRESSION CONTEXT MANAGEMENT
// ============================================================================

/// Set expression context for the current thread
pub fn set_expression_context(expression: &str) {
    let context = ExpressionContext::new(expression);
    EXPRESSION_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

/// Clear expression context for the current thread
pub fn clear_expression_context() {
    EXPRESSION_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with expression context set for its duration
pub fn with_expression_context<F, R>(expression: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_expression_context(expression);
    let result = f();
    clear_expression_context();
    result
}

/// Get current expression context (used by macros)
pub fn get_current_expression_context() -> Option<ExpressionContext> {
    EXPRESSION_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Attach the current expression context to an event, if any is set
pub fn attach_expression_context(event: LogEvent) -> LogEvent {
    match get_current_expression_context() {
        Some(context) => event
            .with_context("expression", &context.preview)
            .with_context("expression_length", &context.length.to_string()),
        None => event,
    }
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::error(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    let event = attach_expression_context(event);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    let event = attach_expression_context(event);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    let event = attach_expression_context(event);

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_context_management() {
        assert!(get_current_expression_context().is_none());

        set_expression_context("1,2,3");
        let context = get_current_expression_context().expect("context set");
        assert_eq!(context.preview, "1,2,3");
        assert_eq!(context.length, 5);

        clear_expression_context();
        assert!(get_current_expression_context().is_none());
    }

    #[test]
    fn test_with_expression_context() {
        let result = with_expression_context("1\n2", || {
            let context = get_current_expression_context().expect("context set");
            // Newlines are escaped for single-line log output
            assert_eq!(context.preview, "1\\n2");
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_expression_context().is_none());
    }

    #[test]
    fn test_long_expression_preview_truncated() {
        let long_expression = "9,".repeat(100);
        set_expression_context(&long_expression);

        let context = get_current_expression_context().expect("context set");
        assert!(context.preview.ends_with("..."));
        assert_eq!(context.length, long_expression.len());

        clear_expression_context();
    }

    #[test]
    fn test_attach_expression_context() {
        set_expression_context("4,5");
        let event = attach_expression_context(LogEvent::info("test"));
        assert_eq!(event.context.get("expression"), Some(&"4,5".to_string()));
        clear_expression_context();
    }

    #[test]
    fn test_safe_logging_without_init() {
        // Must not panic even if global logging is not initialized
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
