//! Logger backends
//!
//! Each backend is a `fern` dispatch chain turned into a boxed [`log::Log`]:
//! stderr for the console logger, an appended file (optionally echoed to
//! stderr) for the file logger, and a host callback for the plugin logger.

use super::error::LoggingError;
use chrono::Local;
use config::{Config, File, FileFormat};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Logging channel of the host application when running as a plugin
pub trait HostLogChannel: Send + Sync {
    /// Receive one formatted record on `channel`
    fn forward(&self, channel: i32, level: log::Level, message: &str);
}

#[derive(Deserialize)]
struct RawLogConfig {
    #[serde(default = "default_level")]
    level: String,
}

fn default_level() -> String {
    "info".to_string()
}

/// Contents of the log configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
        }
    }
}

impl LogConfig {
    /// Read a TOML log configuration file such as `level = "debug"`
    ///
    /// # Errors
    ///
    /// Returns `LoggingError::Config` if the file is missing or malformed and
    /// `LoggingError::InvalidLevel` if the level is not a `log` level name.
    pub fn load(path: &Path) -> Result<Self, LoggingError> {
        let raw: RawLogConfig = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let level = LevelFilter::from_str(&raw.level)
            .map_err(|_| LoggingError::InvalidLevel(raw.level.clone()))?;
        Ok(Self { level })
    }
}

/// Which backend a [`Logger`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerKind {
    Console,
    File,
    Plugin,
}

/// A constructed logger, ready to be used directly or installed globally
pub struct Logger {
    kind: LoggerKind,
    level: LevelFilter,
    inner: Box<dyn Log>,
}

impl Logger {
    /// Logger writing to stderr; `verbose` lowers the level to debug
    #[must_use]
    pub fn console(verbose: bool) -> Self {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        let (level, inner) = timestamped(level).chain(std::io::stderr()).into_log();
        Self {
            kind: LoggerKind::Console,
            level,
            inner,
        }
    }

    /// Logger appending to `path`, also echoing to stderr when `echo` is set
    ///
    /// # Errors
    ///
    /// Returns `LoggingError::LogFile` if the file cannot be opened.
    pub fn file(path: &Path, level: LevelFilter, echo: bool) -> Result<Self, LoggingError> {
        let file = fern::log_file(path).map_err(|source| LoggingError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dispatch = timestamped(level).chain(file);
        if echo {
            dispatch = dispatch.chain(std::io::stderr());
        }
        let (level, inner) = dispatch.into_log();
        Ok(Self {
            kind: LoggerKind::File,
            level,
            inner,
        })
    }

    /// Logger forwarding every record to the host on `channel`
    #[must_use]
    pub fn plugin(channel: i32, host: Arc<dyn HostLogChannel>, level: LevelFilter) -> Self {
        let (level, inner) = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!("{}: {}", record.target(), message));
            })
            .level(level)
            .chain(fern::Output::call(move |record| {
                host.forward(channel, record.level(), &record.args().to_string());
            }))
            .into_log();
        Self {
            kind: LoggerKind::Plugin,
            level,
            inner,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> LoggerKind {
        self.kind
    }

    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        self.level
    }

    /// Install as the global `log` logger
    ///
    /// # Errors
    ///
    /// Returns `LoggingError::AlreadyInstalled` if a global logger exists.
    pub fn install(self) -> Result<(), LoggingError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|_| LoggingError::AlreadyInstalled)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

fn timestamped(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingChannel {
        records: Mutex<Vec<(i32, Level, String)>>,
    }

    impl HostLogChannel for RecordingChannel {
        fn forward(&self, channel: i32, level: Level, message: &str) {
            self.records
                .lock()
                .unwrap()
                .push((channel, level, message.to_string()));
        }
    }

    #[test]
    fn test_log_config_reads_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "level = \"debug\"\n").unwrap();

        assert_eq!(LogConfig::load(&path).unwrap().level, LevelFilter::Debug);
    }

    #[test]
    fn test_log_config_defaults_to_info() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(LogConfig::load(&path).unwrap(), LogConfig::default());
    }

    #[test]
    fn test_log_config_rejects_unknown_level() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "level = \"loud\"\n").unwrap();

        assert!(matches!(LogConfig::load(&path), Err(LoggingError::InvalidLevel(l)) if l == "loud"));
    }

    #[test]
    fn test_console_levels() {
        assert_eq!(Logger::console(true).level(), LevelFilter::Debug);
        assert_eq!(Logger::console(false).level(), LevelFilter::Warn);
        assert_eq!(Logger::console(false).kind(), LoggerKind::Console);
    }

    #[test]
    fn test_file_logger_appends_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("curator.log");
        let logger = Logger::file(&path, LevelFilter::Info, false).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("wizard opened"))
                .level(Level::Info)
                .target("curator")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("too chatty"))
                .level(Level::Debug)
                .target("curator")
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO curator] wizard opened"));
        assert!(!contents.contains("too chatty"));
    }

    #[test]
    fn test_file_logger_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("curator.log");

        let result = Logger::file(&path, LevelFilter::Info, false);
        assert!(matches!(result, Err(LoggingError::LogFile { .. })));
    }

    #[test]
    fn test_plugin_logger_forwards_to_host() {
        let host = Arc::new(RecordingChannel::default());
        let logger = Logger::plugin(3, host.clone(), LevelFilter::Info);

        logger.log(
            &Record::builder()
                .args(format_args!("search started"))
                .level(Level::Warn)
                .target("curator::search")
                .build(),
        );

        let records = host.records.lock().unwrap();
        assert_eq!(
            records.as_slice(),
            &[(3, Level::Warn, "curator::search: search started".to_string())]
        );
    }
}
