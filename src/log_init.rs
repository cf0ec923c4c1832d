use log::{LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

enum Sink {
    Stderr,
    File(Mutex<File>),
}

struct CliLogger {
    level: LevelFilter,
    sink: Sink,
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match &self.sink {
            Sink::Stderr => eprintln!("[{}] {}", record.level(), record.args()),
            Sink::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "[{}] {}", record.level(), record.args());
                }
            }
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &self.sink {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Maps `-v` / `-q` counts onto a level; warnings are shown by default.
pub fn level_from_flags(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the process logger, appending to `path` when given and writing
/// to stderr otherwise.
pub fn init_logger(level: LevelFilter, path: Option<&Path>) -> Result<()> {
    let sink = match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Sink::File(Mutex::new(file))
        }
        None => Sink::Stderr,
    };

    log::set_boxed_logger(Box::new(CliLogger { level, sink }))
        .context("A logger is already installed")?;
    log::set_max_level(level);
    Ok(())
}
