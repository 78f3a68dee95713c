//! Global logging for the SpEL lexer
//!
//! Logging is opt-in: until `init_global_logging` (or the `_with_service`
//! variant) is called every macro is a no-op, so library users who never
//! initialise it pay only an atomic load per call site.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Initialise global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    for code in [
        codes::system::INTERNAL_ERROR,
        codes::lexical::UNRECOGNIZED_CHARACTER,
        codes::source::FILE_NOT_FOUND,
    ] {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialise with a caller-supplied service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// True when a global logger exists and accepts debug events
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

/// Attach context pairs to an event and hand it to the global logger
pub fn log_with_context(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    logger.log_event(event);
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    log_with_context(event, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    log_with_context(LogEvent::success(code, message), context);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_do_not_panic_without_logger() {
        crate::log_error!(codes::system::INTERNAL_ERROR, "error", "k" => 1);
        crate::log_success!(codes::success::TOKENIZATION_COMPLETE, "ok");
        crate::log_info!("info", "count" => 3);
        crate::log_warning!("warning");
        crate::log_debug!("debug", "offset" => 7);
    }

    #[test]
    fn test_global_service_receives_events() {
        let memory = Arc::new(MemoryLogger::new());
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Debug));
        if init_global_logging_with_service(service).is_err() {
            // Another test installed the global logger first.
            return;
        }

        crate::log_error!(
            codes::lexical::UNTERMINATED_STRING,
            "unterminated",
            "offset" => 4
        );
        assert!(memory.has_error_with_code(codes::lexical::UNTERMINATED_STRING));
        assert!(debug_enabled());
    }
}
