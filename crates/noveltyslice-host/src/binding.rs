//! Load-time binding: version check, function resolution, action registration.
//!
//! REAPER hands the extension a record holding its ABI version and a
//! `GetFunc(name)` lookup. [`load`] checks the record and resolves every name
//! in [`REQUIRED_FUNCTIONS`] into a [`FunctionTable`]; the C ABI shim turns
//! that table into typed function pointers. Nothing is registered with the
//! host until binding has fully succeeded.

use crate::error::{BindError, LoadError};
use crate::host::{ActionId, CustomAction, Host};

/// Plugin ABI version this extension is built against.
pub const REAPER_PLUGIN_VERSION: i32 = 0x20E;

/// Host functions the extension cannot run without.
pub const REQUIRED_FUNCTIONS: &[&str] = &[
    "plugin_register",
    "plugin_getapi",
    "ShowMessageBox",
    "ShowConsoleMsg",
    "GetSelectedMediaItem",
    "GetActiveTake",
    "GetMediaItemTake_Source",
    "GetMediaSourceSampleRate",
];

/// The record a host passes to the plugin entry point.
pub trait PluginRecord {
    /// Whatever the lookup yields for a name (a raw pointer for REAPER).
    type Function: Copy;

    /// ABI version the host was built with.
    fn caller_version(&self) -> i32;

    /// Resolve a named host function.
    fn get_func(&self, name: &str) -> Option<Self::Function>;
}

/// Named host functions resolved from a [`PluginRecord`].
#[derive(Debug, Clone)]
pub struct FunctionTable<F> {
    entries: Vec<(&'static str, F)>,
}

impl<F: Copy> FunctionTable<F> {
    /// Resolve every name, failing on the first one the host lacks.
    pub fn resolve<R>(record: &R, names: &[&'static str]) -> Result<Self, BindError>
    where
        R: PluginRecord<Function = F>,
    {
        let entries = names
            .iter()
            .map(|&name| {
                record
                    .get_func(name)
                    .map(|f| (name, f))
                    .ok_or(BindError::MissingFunction(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Look up a resolved function.
    pub fn get(&self, name: &str) -> Option<F> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, f)| f)
    }

    /// Look up a function that must have been resolved.
    pub fn require(&self, name: &'static str) -> Result<F, BindError> {
        self.get(name).ok_or(BindError::MissingFunction(name))
    }

    /// Number of resolved functions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validate the entry-point record and resolve [`REQUIRED_FUNCTIONS`].
///
/// `None` stands for a null record pointer.
pub fn load<R: PluginRecord>(record: Option<&R>) -> Result<FunctionTable<R::Function>, LoadError> {
    let record = record.ok_or(LoadError::NullRecord)?;

    let found = record.caller_version();
    if found != REAPER_PLUGIN_VERSION {
        return Err(LoadError::VersionMismatch {
            expected: REAPER_PLUGIN_VERSION,
            found,
        });
    }

    let table = FunctionTable::resolve(record, REQUIRED_FUNCTIONS)?;
    tracing::debug!(functions = table.len(), "host functions resolved");
    Ok(table)
}

/// Register `action` and the command hook that dispatches it.
pub fn register_action<H: Host>(host: &H, action: &CustomAction) -> Result<ActionId, LoadError> {
    let id = host
        .register_custom_action(action)
        .ok_or(LoadError::ActionRegistration(action.id))?;
    if !host.register_command_hook() {
        return Err(LoadError::CommandHook);
    }
    tracing::debug!(action = action.id, command = id.0, "action registered");
    Ok(id)
}
