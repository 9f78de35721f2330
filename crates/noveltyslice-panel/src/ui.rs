//! Immediate-mode GUI seam.
//!
//! The panel draws through these traits so the same frame code runs on
//! ReaImGui inside REAPER and on egui in the standalone preview. A backend
//! creates one [`Ui`] context per panel; the context is released when the
//! value is dropped.

use thiserror::Error;

/// When a `set_next_window_*` request takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cond {
    /// Every frame.
    Always,
    /// Only the first time the window is ever shown.
    #[default]
    FirstUseEver,
}

/// Widgets available inside a window.
pub trait Widgets {
    /// A push button. Returns `true` on the frame it was clicked.
    fn button(&mut self, label: &str) -> bool;

    /// A line of static text.
    fn text(&mut self, text: &str);

    /// An integer slider. Returns `true` when the value changed.
    fn slider_int(&mut self, label: &str, value: &mut i32, min: i32, max: i32) -> bool;

    /// A floating-point slider. Returns `true` when the value changed.
    fn slider_f64(&mut self, label: &str, value: &mut f64, min: f64, max: f64) -> bool;
}

/// A GUI context able to draw top-level windows.
pub trait Ui {
    /// Size the next window drawn.
    fn set_next_window_size(&mut self, width: f32, height: f32, cond: Cond);

    /// Bring the next window drawn to the front.
    fn set_next_window_focus(&mut self);

    /// Draw a window titled `title`.
    ///
    /// `open` is cleared when the user closes the window. `contents` runs only
    /// while the window is visible. Returns whether it was.
    fn window(
        &mut self,
        title: &str,
        open: &mut bool,
        contents: &mut dyn FnMut(&mut dyn Widgets),
    ) -> bool;
}

/// Creates GUI contexts.
pub trait GuiBackend {
    /// Context type handed to a panel.
    type Context: Ui;

    /// Create a context labelled `name`.
    fn create_context(&mut self, name: &str) -> Result<Self::Context, GuiError>;
}

/// GUI context creation failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuiError {
    /// The GUI library is not installed or did not export a required function.
    #[error("GUI library unavailable: {0}")]
    Unavailable(String),

    /// The library refused to create a context.
    #[error("failed to create GUI context '{0}'")]
    ContextCreation(String),
}

/// A context that never shows a window.
///
/// Useful for driving an [`Extension`](crate::Extension) headless: windows
/// stay open and their contents never run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl Ui for NullUi {
    fn set_next_window_size(&mut self, _width: f32, _height: f32, _cond: Cond) {}

    fn set_next_window_focus(&mut self) {}

    fn window(
        &mut self,
        _title: &str,
        _open: &mut bool,
        _contents: &mut dyn FnMut(&mut dyn Widgets),
    ) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            GuiError::Unavailable("ImGui_CreateContext".into()).to_string(),
            "GUI library unavailable: ImGui_CreateContext"
        );
        assert_eq!(
            GuiError::ContextCreation("FluCoMa NoveltySlice".into()).to_string(),
            "failed to create GUI context 'FluCoMa NoveltySlice'"
        );
    }

    #[test]
    fn null_ui_keeps_window_open() {
        let mut ui = NullUi;
        let mut open = true;
        let mut ran = false;
        assert!(!ui.window("w", &mut open, &mut |_: &mut dyn Widgets| ran = true));
        assert!(open);
        assert!(!ran);
    }

    #[test]
    fn cond_defaults_to_first_use() {
        assert_eq!(Cond::default(), Cond::FirstUseEver);
    }
}
