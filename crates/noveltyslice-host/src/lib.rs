//! Host capability interface for the NoveltySlice REAPER extension.
//!
//! This crate keeps every REAPER-facing contract free of raw pointers so the
//! extension logic can be exercised without a running DAW:
//!
//! - [`host`] - the [`Host`] trait: media queries, dialogs, console, registration
//! - [`binding`] - entry-point checks and named function resolution ([`load`])
//! - [`error`] - [`LoadError`] and [`BindError`]
//! - [`simulated`] - [`SimulatedHost`], an in-memory host for tests and previews
//!
//! # Load sequence
//!
//! ```rust
//! use noveltyslice_host::{load, register_action, CustomAction, SimulatedHost, SimulatedRecord};
//!
//! let record = SimulatedRecord::complete();
//! let table = load(Some(&record)).expect("record is valid");
//! assert!(!table.is_empty());
//!
//! let host = SimulatedHost::new();
//! let action = CustomAction { section: 0, id: "EXAMPLE_ACTION", name: "Example" };
//! let id = register_action(&host, &action).expect("host accepts actions");
//! assert!(host.hook_registered());
//! # let _ = id;
//! ```

pub mod binding;
pub mod error;
pub mod host;
pub mod simulated;

pub use binding::{
    FunctionTable, PluginRecord, REAPER_PLUGIN_VERSION, REQUIRED_FUNCTIONS, load, register_action,
};
pub use error::{BindError, LoadError};
pub use host::{ActionId, CustomAction, Host, MessageBoxKind};
pub use simulated::{MessageBox, SimItem, SimSource, SimTake, SimulatedHost, SimulatedRecord};
