use log::LevelFilter::*;
use std::sync::Mutex;

static LOGGING_INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Installs the global logger writing to stdout. Only the first call has any effect.
pub fn init_logging(verbosity: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut initialized = LOGGING_INITIALIZED.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if *initialized {
        return Ok(());
    }

    fern::Dispatch::new()
        .level(verbosity)
        .format(|out, message, record| {
            if record.level() >= Trace {
                out.finish(format_args!("[TRACE] {}: {}", record.target(), message))
            } else if record.level() >= Debug {
                out.finish(format_args!("[DEBUG] {}: {}", record.target(), message))
            } else if record.level() <= Warn {
                out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
            } else {
                out.finish(format_args!("{}", message))
            }
        })
        .chain(std::io::stdout())
        .apply()?;

    *initialized = true;
    Ok(())
}
