use chrono::Local;
use csv::Writer;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tabled::Tabled;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("cannot create log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("a logger is already installed: {0}")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// log file name stamped with the current local time
pub fn default_log_file_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// "debug", "info", "warn", "error", "trace" or "off"
pub fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        _ => Err(format!(
            "unknown log level '{}', expected trace, debug, info, warn, error or off",
            level
        )),
    }
}

/// Installs a terminal logger and, if asked, a file logger at the same level.
/// The log file is created before anything is installed.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<(), LoggerError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));

    // File logger
    if let Some(filename) = log_file {
        let file = File::create(filename).map_err(|source| LoggerError::LogFile {
            path: filename.display().to_string(),
            source,
        })?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}

/// Writes an iteration table to csv, header row taken from the record's column names.
pub fn save_iterations_to_csv<R: Tabled>(records: &[R], path: &Path) -> Result<(), csv::Error> {
    let mut writer = Writer::from_path(path)?;
    let headers: Vec<String> = R::headers().into_iter().map(|h| h.into_owned()).collect();
    writer.write_record(&headers)?;
    for record in records {
        let row: Vec<String> = record.fields().into_iter().map(|f| f.into_owned()).collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
