//! NoveltySlice Panel - the extension's GUI and lifecycle
//!
//! Everything here is safe, host-agnostic code driven through two seams:
//! [`Host`](noveltyslice_host::Host) for DAW operations and [`GuiBackend`] for
//! immediate-mode drawing.
//!
//! - [`extension`] - [`Extension`]: action registration and panel lifecycle
//! - [`panel`] - [`Panel`]: per-frame window, sliders, the apply action
//! - [`ui`] - GUI traits ([`Ui`], [`Widgets`], [`GuiBackend`])
//! - [`config`] - [`PanelConfig`] TOML file
//! - [`paths`] - Platform config locations
//! - [`error`] - [`ApplyError`], [`ConfigError`]
//!
//! ## Example
//!
//! ```rust
//! use noveltyslice_host::SimulatedHost;
//! use noveltyslice_panel::{Extension, GuiBackend, GuiError, NullUi, PanelConfig};
//!
//! struct NoGui;
//!
//! impl GuiBackend for NoGui {
//!     type Context = NullUi;
//!     fn create_context(&mut self, name: &str) -> Result<Self::Context, GuiError> {
//!         Err(GuiError::Unavailable(name.to_owned()))
//!     }
//! }
//!
//! let mut ext = Extension::new(SimulatedHost::new(), NoGui, PanelConfig::default());
//! let id = ext.install().unwrap();
//! assert!(ext.on_command(id.0));
//! // Context creation failed: reported, nothing left open.
//! assert!(!ext.is_open());
//! assert_eq!(ext.host().message_boxes().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod extension;
pub mod panel;
pub mod paths;
pub mod ui;

pub use config::{PanelConfig, WindowConfig};
pub use error::{ApplyError, ConfigError};
pub use extension::{Extension, NOVELTYSLICE_ACTION};
pub use panel::{Panel, PanelState, STATUS_APPLIED, STATUS_READY};
pub use ui::{Cond, GuiBackend, GuiError, NullUi, Ui, Widgets};

/// Window title, message box title, and GUI context label.
pub const PLUGIN_NAME: &str = "FluCoMa NoveltySlice";
