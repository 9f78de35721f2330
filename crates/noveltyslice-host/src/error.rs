//! Error types for loading the extension.

use thiserror::Error;

/// A required host function could not be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The host did not provide a function by this name.
    #[error("host function not available: {0}")]
    MissingFunction(&'static str),
}

/// Errors that abort loading the extension. The entry point returns 0 for
/// every variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The host passed no plugin record (also how REAPER signals unload).
    #[error("no plugin record supplied")]
    NullRecord,

    /// The host's plugin ABI version differs from the one compiled against.
    #[error("plugin ABI version mismatch: expected {expected:#x}, host has {found:#x}")]
    VersionMismatch {
        /// Version this extension was built for.
        expected: i32,
        /// Version reported by the host.
        found: i32,
    },

    /// Function resolution failed.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The host refused the custom action.
    #[error("failed to register action '{0}'")]
    ActionRegistration(&'static str),

    /// The host refused the command hook.
    #[error("failed to register command hook")]
    CommandHook,
}
