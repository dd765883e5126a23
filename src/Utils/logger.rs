use crate::numerical::Quadrature::quad_error::QuadratureError;
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::path::Path;

/// map loglevel names to filters; None means logging is switched off
pub fn parse_loglevel(level: &str) -> Result<Option<LevelFilter>, QuadratureError> {
    match level {
        "off" | "none" => Ok(None),
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        other => Err(QuadratureError::UnknownLogLevel(other.to_string())),
    }
}

/// Terminal logger, plus a log_<date>.txt file when `to_file` is set.
/// A logger installed earlier (e.g. by a previous call) is kept as is.
pub fn init_logger(loglevel: Option<&str>, to_file: bool) -> Result<(), QuadratureError> {
    let log_option = match loglevel {
        Some(level) => match parse_loglevel(level)? {
            Some(filter) => filter,
            None => return Ok(()),
        },
        None => LevelFilter::Info,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(log_option, Config::default(), File::create(name)?));
    }
    // SetLoggerError only means a logger is already installed
    let _ = CombinedLogger::init(loggers);
    Ok(())
}

/// Write a header row and string rows to a csv file
pub fn save_rows_to_csv<P: AsRef<Path>>(
    headers: &[&str],
    rows: &[Vec<String>],
    filename: P,
) -> Result<(), QuadratureError> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
