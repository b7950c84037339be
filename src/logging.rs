// In: src/logging.rs

//! Opt-in `env_logger` setup for hosts that do not install their own logger.
//!
//! Library code only talks to the `log` facade. Embedding applications that
//! already configure a logger should not call anything in this module.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::NimbleError;

static INIT_LOGGER: Once = Once::new();

/// Installs a process-wide `env_logger` at `level`, optionally appending to
/// `log_file` instead of stderr. Only the first call has any effect.
///
/// # Errors
/// Returns `NimbleError::Io` if `log_file` cannot be opened for appending.
pub fn enable_verbose_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<(), NimbleError> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(level);

        // Just the level and message.
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        // Another logger may already be installed by the host; that is fine.
        let _ = builder.try_init();
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_logging_is_repeatable() {
        assert!(enable_verbose_logging(LevelFilter::Debug, None).is_ok());
        assert!(enable_verbose_logging(LevelFilter::Trace, None).is_ok());
    }

    #[test]
    fn test_unopenable_log_file_is_reported() {
        let result = enable_verbose_logging(
            LevelFilter::Info,
            Some(Path::new("/nonexistent-dir/for/nimble/encoder.log")),
        );
        assert!(matches!(result, Err(NimbleError::Io(_))));
    }
}
