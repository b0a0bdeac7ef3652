//! Leveled log sink the uploader reports its decisions to.

use std::fmt;

/// Severity of a sink message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Error,
    Critical,
}

impl LogLevel {
    /// Returns the conventional upper-case level name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of uploader log records.
///
/// Implementations are owned by the caller and borrowed by the uploader.
pub trait LogSink {
    fn log(&self, level: LogLevel, message: &str);
}

/// Where the uploader sends its records.
#[derive(Clone, Copy, Default)]
pub enum LogTarget<'a> {
    /// Records are dropped.
    #[default]
    Silent,
    Sink(&'a dyn LogSink),
}

impl<'a> LogTarget<'a> {
    pub fn log(&self, level: LogLevel, message: &str) {
        if let Self::Sink(sink) = self {
            sink.log(level, message);
        }
    }
}

impl<'a> From<Option<&'a dyn LogSink>> for LogTarget<'a> {
    fn from(sink: Option<&'a dyn LogSink>) -> Self {
        match sink {
            Some(sink) => Self::Sink(sink),
            None => Self::Silent,
        }
    }
}

impl<'a> From<&'a dyn LogSink> for LogTarget<'a> {
    fn from(sink: &'a dyn LogSink) -> Self {
        Self::Sink(sink)
    }
}

impl fmt::Debug for LogTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => f.write_str("Silent"),
            Self::Sink(_) => f.write_str("Sink(..)"),
        }
    }
}

/// Forwards sink records to `tracing`.
///
/// `Critical` has no `tracing` counterpart and is emitted at error level
/// with `critical = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Critical => tracing::error!(critical = true, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(LogLevel, String)>>);

    impl LogSink for Recorder {
        fn log(&self, level: LogLevel, message: &str) {
            self.0.lock().unwrap().push((level, message.to_string()));
        }
    }

    #[test]
    fn level_names() {
        assert_eq!(LogLevel::Info.to_string(), "INFO");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
        assert_eq!(LogLevel::Critical.to_string(), "CRITICAL");
    }

    #[test]
    fn silent_target_drops_records() {
        let target = LogTarget::default();
        assert!(matches!(target, LogTarget::Silent));
        target.log(LogLevel::Error, "nobody hears this");
    }

    #[test]
    fn sink_target_forwards_records() {
        let rec = Recorder::default();
        let target = LogTarget::from(&rec as &dyn LogSink);
        target.log(LogLevel::Info, "hello");
        target.log(LogLevel::Critical, "boom");

        let records = rec.0.lock().unwrap();
        assert_eq!(
            *records,
            vec![
                (LogLevel::Info, "hello".to_string()),
                (LogLevel::Critical, "boom".to_string()),
            ]
        );
    }

    #[test]
    fn none_maps_to_silent() {
        let target = LogTarget::from(None::<&dyn LogSink>);
        assert!(matches!(target, LogTarget::Silent));
    }
}
