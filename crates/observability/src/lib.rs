//! Tracing/logging setup shared by binaries, plus a bus decorator that logs
//! every published event.

pub mod event_log;
pub mod logging;

pub use event_log::TracingEventBus;
pub use logging::{ENV_LOG_FORMAT, LogFormat};

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
