use std::fmt::{Display, Formatter};
use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONSOLE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}";

#[derive(Debug)]
pub enum LoggingError {
    File(String),
    Config(log4rs::config::runtime::ConfigErrors),
    AlreadyInitialized(log::SetLoggerError),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::File(e) => write!(f, "Invalid log4rs file: {}", e),
            LoggingError::Config(e) => write!(f, "Invalid logger configuration: {}", e),
            LoggingError::AlreadyInitialized(e) => write!(f, "Logger already set: {}", e),
        }
    }
}

impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self {
        LoggingError::Config(e)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self {
        LoggingError::AlreadyInitialized(e)
    }
}

pub fn init(log_config: Option<&Path>) -> Result<(), LoggingError> {
    if let Some(path) = log_config {
        return log4rs::init_file(path, Default::default()).map_err(|e| LoggingError::File(format!("{:#}", e)));
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
