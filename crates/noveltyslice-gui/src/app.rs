//! Preview application: a simulated REAPER around the real panel.

use std::time::Duration;

use egui::{CentralPanel, Context, ScrollArea, SidePanel, TopBottomPanel};
use noveltyslice_host::{ActionId, MessageBox, SimItem, SimulatedHost};
use noveltyslice_panel::{Extension, PanelConfig};

use crate::egui_backend::EguiBackend;

/// Interval between simulated host timer ticks.
const TIMER_INTERVAL: Duration = Duration::from_millis(33);

/// The extension as hosted by the preview.
pub type PreviewExtension = Extension<SimulatedHost, EguiBackend>;

/// What the simulated project has selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Whether an item is selected at all.
    pub selected: bool,
    /// The selected item's source sample rate.
    pub sample_rate: f64,
}

impl Selection {
    /// Push this selection into `host`.
    pub fn apply_to(&self, host: &SimulatedHost) {
        if self.selected {
            host.select(SimItem::with_sample_rate(self.sample_rate));
        } else {
            host.clear_selection();
        }
    }
}

/// Main application state.
pub struct PreviewApp {
    extension: PreviewExtension,
    command: Option<ActionId>,
    selection: Selection,
    /// Message boxes already dismissed.
    acknowledged: usize,
}

impl PreviewApp {
    /// Install the extension on `host` and draw it into `ctx`.
    pub fn new(
        ctx: &Context,
        host: SimulatedHost,
        selection: Selection,
        config: PanelConfig,
    ) -> Self {
        selection.apply_to(&host);
        let mut extension = Extension::new(host, EguiBackend::new(ctx.clone()), config);
        let command = match extension.install() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::error!(error = %e, "extension failed to install");
                None
            }
        };
        Self {
            extension,
            command,
            selection,
            acknowledged: 0,
        }
    }

    /// The hosted extension.
    pub fn extension(&self) -> &PreviewExtension {
        &self.extension
    }

    /// Invoke the registered action, as REAPER's action list would.
    pub fn run_action(&mut self) {
        if let Some(id) = self.command {
            self.extension.on_command(id.0);
        }
    }

    /// The oldest message box not yet dismissed.
    fn pending_message_box(&self) -> Option<MessageBox> {
        self.extension
            .host()
            .message_boxes()
            .get(self.acknowledged)
            .cloned()
    }

    fn host_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Host");
        ui.separator();

        let action_label = noveltyslice_panel::NOVELTYSLICE_ACTION.name;
        if ui
            .add_enabled(self.command.is_some(), egui::Button::new(action_label))
            .clicked()
        {
            self.run_action();
        }

        ui.add_space(8.0);
        ui.label("Selected item");
        let before = self.selection;
        ui.checkbox(&mut self.selection.selected, "Item selected");
        ui.add_enabled(
            self.selection.selected,
            egui::DragValue::new(&mut self.selection.sample_rate)
                .range(1.0..=384_000.0)
                .suffix(" Hz"),
        );
        if self.selection != before {
            self.selection.apply_to(self.extension.host());
        }

        ui.add_space(8.0);
        let host = self.extension.host();
        ui.label(format!(
            "Timer: {}",
            if host.timer_registered() { "registered" } else { "idle" }
        ));
        if let Some(panel) = self.extension.panel() {
            ui.label(format!("Status: {}", panel.status()));
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        SidePanel::left("host").show(ctx, |ui| self.host_controls(ui));

        TopBottomPanel::bottom("console")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                ui.label("Console");
                ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                    ui.monospace(self.extension.host().console_output().as_str());
                });
            });

        CentralPanel::default().show(ctx, |_ui| {});

        // The host timer: one panel frame per update while registered.
        if self.extension.host().timer_registered() {
            self.extension.tick();
            ctx.request_repaint_after(TIMER_INTERVAL);
        }

        if let Some(message_box) = self.pending_message_box() {
            egui::Window::new(message_box.title.as_str())
                .id(egui::Id::new(("message_box", self.acknowledged)))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message_box.message.as_str());
                    if ui.button("OK").clicked() {
                        self.acknowledged += 1;
                    }
                });
        }
    }
}

impl Drop for PreviewApp {
    fn drop(&mut self) {
        self.extension.shutdown();
    }
}
