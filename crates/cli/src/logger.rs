use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

/// Timestamped logger writing to stderr
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// Map `-v` repetitions to a level: warnings by default, then info, debug, trace
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn format_entry(timestamp: &str, level: Level, target: &str, message: &str) -> String {
    format!("{timestamp} {level:<5} {target}: {message}")
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
            eprintln!(
                "{}",
                format_entry(
                    &timestamp,
                    record.level(),
                    record.target(),
                    &record.args().to_string()
                )
            );
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = StderrLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_init_installs_global_logger() {
        StderrLogger::new(LevelFilter::Debug).init().unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert!(log::log_enabled!(target: "invoice::fonts", Level::Debug));
        // a second logger is refused and surfaces as an error for `main`
        let err: anyhow::Error = StderrLogger::new(LevelFilter::Info).init().unwrap_err().into();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry("12:00:00.000", Level::Warn, "invoice::fonts", "no font"),
            "12:00:00.000 WARN  invoice::fonts: no font"
        );
    }
}
