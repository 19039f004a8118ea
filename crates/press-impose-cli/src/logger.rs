use chrono::Local;
use log::{LevelFilter, Metadata, Record};

/// Timestamped log lines on stderr, keeping stdout clean for output
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(verbose: bool) -> Self {
        let level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {:<5} [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
