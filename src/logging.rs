use tracing::{debug, span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace, Info, Debug, Warn, Error
}
impl LogLevel {
    pub fn to_log_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }

    /// Parse a level name; unknown names fall back to the default.
    pub fn from_name(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::default(),
        }
    }
}
impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

const SPAN_NAME: &str = "training";
pub struct Logger;

impl Logger {
    /// Initialize the logger
    pub fn init(level: LogLevel) {
        if let Err(e) = tracing_subscriber::fmt()
            .with_max_level(level.to_log_level())
            .with_writer(std::io::stderr)
            .try_init()
        {
            debug!("Keeping the installed subscriber: {}", e);
        }
    }

    /// Run `f` inside the training span.
    pub fn with_span<T>(f: impl FnOnce() -> T) -> T {
        let span = span!(tracing::Level::INFO, SPAN_NAME);
        let _guard = span.enter();
        f()
    }
}

pub fn setup_logger(level: &str) {
    Logger::init(LogLevel::from_name(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::from_name("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_name("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_name("verbose"), LogLevel::Info);
        assert_eq!(LogLevel::Error.to_log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_span_returns_closure_value() {
        setup_logger("trace");
        assert_eq!(Logger::with_span(|| 41 + 1), 42);
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        Logger::init(LogLevel::Debug);
        Logger::init(LogLevel::Error);
        assert!(tracing::dispatcher::has_been_set());
    }
}
