//! Logging utilities
//!
//! The renderer logs through the `log` facade; `init` installs `env_logger`
//! as the backend, honouring `RUST_LOG`.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Safe to call more than once. Later calls are ignored, so tests and
/// embedding applications can both call it.
pub fn init() {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
