//! Route `tracing` output to REAPER's console window.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::api::c_string;
use crate::ffi::ShowConsoleMsgFn;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "NOVELTYSLICE_LOG";

/// Default filter when [`LOG_ENV`] is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Writes each formatted event with `ShowConsoleMsg`.
#[derive(Clone, Copy)]
pub struct ConsoleWriter {
    show: ShowConsoleMsgFn,
}

impl ConsoleWriter {
    /// A writer calling `show`.
    pub fn new(show: ShowConsoleMsgFn) -> Self {
        Self { show }
    }
}

impl io::Write for ConsoleWriter {
    #[allow(unsafe_code)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = c_string(&String::from_utf8_lossy(buf));
        // SAFETY: NUL-terminated and outlives the call.
        unsafe { (self.show)(text.as_ptr()) }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install the console subscriber. Later calls (a reloaded extension in the
/// same process) keep the first subscriber.
pub fn init(show: ShowConsoleMsgFn) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into());
    let writer = ConsoleWriter::new(show);

    // try_init also bridges legacy log:: calls
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(move || writer)
        .with_ansi(false)
        .without_time()
        .try_init()
        .ok();
}
