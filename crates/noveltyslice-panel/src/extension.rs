//! Extension state: the registered action and at most one panel.
//!
//! [`Extension`] owns everything the REAPER callbacks touch. The C ABI shim
//! keeps exactly one in a thread-local slot and forwards each callback:
//!
//! | Callback                         | Method                      |
//! |----------------------------------|-----------------------------|
//! | entry point, valid record        | [`Extension::install`]      |
//! | `hookcommand2`                   | [`Extension::on_command`]   |
//! | `timer`                          | [`Extension::tick`]         |
//! | entry point, null record         | [`Extension::shutdown`]     |
//!
//! The panel goes absent → open on the first action invocation, stays open
//! (requesting focus) on later invocations, and goes back to absent when its
//! window is closed or the extension unloads. The host timer is registered
//! exactly while a panel exists.

use noveltyslice_analysis::NoveltySliceClient;
use noveltyslice_host::{ActionId, CustomAction, Host, LoadError, MessageBoxKind, register_action};

use crate::PLUGIN_NAME;
use crate::config::PanelConfig;
use crate::panel::{Panel, PanelState};
use crate::ui::GuiBackend;

/// The action REAPER lists for this extension.
pub const NOVELTYSLICE_ACTION: CustomAction = CustomAction {
    section: 0,
    id: "FLUCOMA_NOVELTYSLICE",
    name: "FluCoMa: Apply NoveltySlice to selected item",
};

/// The loaded extension.
pub struct Extension<H: Host, B: GuiBackend> {
    host: H,
    backend: B,
    config: PanelConfig,
    command: Option<ActionId>,
    panel: Option<Panel<B::Context>>,
}

impl<H: Host, B: GuiBackend> Extension<H, B> {
    /// Create an extension. Nothing is registered until [`install`](Self::install).
    pub fn new(host: H, backend: B, config: PanelConfig) -> Self {
        Self {
            host,
            backend,
            config,
            command: None,
            panel: None,
        }
    }

    /// Register the action and command hook with the host.
    pub fn install(&mut self) -> Result<ActionId, LoadError> {
        let id = register_action(&self.host, &NOVELTYSLICE_ACTION)?;
        self.command = Some(id);
        tracing::info!(command = id.0, "{PLUGIN_NAME} installed");
        Ok(id)
    }

    /// Handle a command from the host. Returns `true` if it was ours.
    pub fn on_command(&mut self, command: i32) -> bool {
        if self.command.is_none_or(|id| id.0 != command) {
            return false;
        }
        self.open();
        true
    }

    /// Open the panel, or focus it if it is already open.
    pub fn open(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.request_focus();
            self.trace("panel already open, focusing");
            return;
        }

        match self.backend.create_context(PLUGIN_NAME) {
            Ok(ctx) => {
                let client = NoveltySliceClient::new(self.config.analysis.clone());
                self.panel = Some(Panel::new(ctx, self.config.window, client));
                self.host.register_timer();
                self.trace("panel created");
                tracing::debug!("panel opened");
            }
            Err(e) => {
                tracing::warn!(error = %e, "panel not opened");
                self.trace("failed to create GUI context");
                self.host
                    .show_message_box(&e.to_string(), PLUGIN_NAME, MessageBoxKind::Ok);
            }
        }
    }

    /// Timer callback: draw one frame, closing the panel if its window was closed.
    pub fn tick(&mut self) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        tracing::trace!("frame");
        if panel.frame(&self.host) == PanelState::Closed {
            self.close();
        }
    }

    /// Drop the panel and stop the timer. No-op when absent.
    pub fn close(&mut self) {
        if self.panel.take().is_some() {
            self.host.unregister_timer();
            self.trace("panel closed");
            tracing::debug!("panel closed");
        }
    }

    /// Tear down on extension unload.
    pub fn shutdown(&mut self) {
        self.close();
        tracing::info!("{PLUGIN_NAME} unloaded");
    }

    /// Whether a panel is open.
    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }

    /// The open panel, if any.
    pub fn panel(&self) -> Option<&Panel<B::Context>> {
        self.panel.as_ref()
    }

    /// The open panel, if any.
    pub fn panel_mut(&mut self) -> Option<&mut Panel<B::Context>> {
        self.panel.as_mut()
    }

    /// Command id assigned at install.
    pub fn command_id(&self) -> Option<ActionId> {
        self.command
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The GUI backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The GUI backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Loaded configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    fn trace(&self, line: &str) {
        if self.config.console_trace {
            self.host.show_console_msg(&format!("NoveltySlice: {line}\n"));
        }
    }
}

impl<H: Host, B: GuiBackend> std::fmt::Debug for Extension<H, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("command", &self.command)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}
