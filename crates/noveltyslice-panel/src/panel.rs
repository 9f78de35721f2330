//! The NoveltySlice panel: one window, drawn once per host timer tick.

use noveltyslice_analysis::{NoveltySliceClient, ParamDescriptor, ParameterInfo};
use noveltyslice_host::{Host, MessageBoxKind};

use crate::PLUGIN_NAME;
use crate::config::WindowConfig;
use crate::error::ApplyError;
use crate::ui::{Cond, Ui, Widgets};

/// Status shown before the first apply.
pub const STATUS_READY: &str = "Ready to slice";

/// Status shown after a successful apply.
pub const STATUS_APPLIED: &str = "NoveltySlice applied successfully";

/// Label of the apply button.
pub const APPLY_LABEL: &str = "Apply NoveltySlice";

/// Whether the panel's window survived the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Keep ticking.
    Open,
    /// The user closed the window.
    Closed,
}

/// Walk selected item → active take → source and read its sample rate.
///
/// Only the first selected item of the current project is considered.
pub fn selected_source_sample_rate<H: Host>(host: &H) -> Result<f64, ApplyError> {
    let item = host
        .selected_media_item(0)
        .ok_or(ApplyError::NoSelectedItem)?;
    let take = host.active_take(item).ok_or(ApplyError::NoActiveTake)?;
    let source = host.take_source(take).ok_or(ApplyError::NoSource)?;
    Ok(host.source_sample_rate(source))
}

/// Format a sample rate the way the apply message box shows it.
pub fn format_sample_rate(rate: f64) -> String {
    format!("{rate:.6}")
}

/// An open panel and its GUI context.
pub struct Panel<C> {
    ctx: C,
    window: WindowConfig,
    client: NoveltySliceClient,
    status: String,
    focus_pending: bool,
}

impl<C: Ui> Panel<C> {
    /// Wrap a freshly created context.
    pub fn new(ctx: C, window: WindowConfig, client: NoveltySliceClient) -> Self {
        Self {
            ctx,
            window,
            client,
            status: STATUS_READY.to_owned(),
            focus_pending: false,
        }
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The analysis client the sliders edit.
    pub fn client(&self) -> &NoveltySliceClient {
        &self.client
    }

    /// The GUI context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Bring the window to the front on the next frame.
    pub fn request_focus(&mut self) {
        self.focus_pending = true;
    }

    /// Whether a focus request is waiting for the next frame.
    pub fn focus_pending(&self) -> bool {
        self.focus_pending
    }

    /// Draw one frame.
    pub fn frame<H: Host>(&mut self, host: &H) -> PanelState {
        let Self {
            ctx,
            window,
            client,
            status,
            focus_pending,
        } = self;

        ctx.set_next_window_size(window.width, window.height, Cond::FirstUseEver);
        if std::mem::take(focus_pending) {
            ctx.set_next_window_focus();
        }

        let mut open = true;
        ctx.window(PLUGIN_NAME, &mut open, &mut |ui: &mut dyn Widgets| {
            draw_params(ui, client);
            if ui.button(APPLY_LABEL) {
                *status = apply(host);
            }
            ui.text(status.as_str());
        });

        if open {
            PanelState::Open
        } else {
            PanelState::Closed
        }
    }

    /// Run the apply action as if the button had been clicked.
    pub fn apply<H: Host>(&mut self, host: &H) -> &str {
        self.status = apply(host);
        &self.status
    }
}

impl<C> std::fmt::Debug for Panel<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("status", &self.status)
            .field("focus_pending", &self.focus_pending)
            .field("params", self.client.params())
            .finish_non_exhaustive()
    }
}

/// Apply and return the new status line.
fn apply<H: Host>(host: &H) -> String {
    match selected_source_sample_rate(host) {
        Ok(rate) => {
            host.show_message_box(&format_sample_rate(rate), PLUGIN_NAME, MessageBoxKind::Ok);
            tracing::debug!(sample_rate = rate, "apply succeeded");
            STATUS_APPLIED.to_owned()
        }
        Err(e) => {
            tracing::debug!(error = %e, "apply failed");
            format!("Failed to apply NoveltySlice: {e}")
        }
    }
}

// ── Parameter sliders ───────────────────────────────────────────────────────

fn descriptor(client: &NoveltySliceClient, string_id: &str) -> Option<(usize, ParamDescriptor)> {
    let params = client.params();
    let index = params.find_param(string_id)?;
    params.param_info(index).map(|desc| (index, desc))
}

fn draw_params(ui: &mut dyn Widgets, client: &mut NoveltySliceClient) {
    if let Some((index, desc)) = descriptor(client, "threshold") {
        let mut value = f64::from(client.params().get_param(index));
        if ui.slider_f64(desc.name, &mut value, f64::from(desc.min), f64::from(desc.max)) {
            client.params_mut().set_param(index, value as f32);
        }
    }

    if let Some((index, desc)) = descriptor(client, "kernel_size") {
        let mut value = client.params().get_param(index) as i32;
        if ui.slider_int(desc.name, &mut value, desc.min as i32, desc.max as i32) {
            client.params_mut().set_param(index, value as f32);
        }
    }
}
