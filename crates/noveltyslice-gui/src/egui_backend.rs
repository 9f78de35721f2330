//! [`GuiBackend`] over egui, for running the panel outside REAPER.
//!
//! Each context draws into the application's shared `egui::Context`, so
//! `tick` must be called from inside an egui pass (`eframe::App::update`).

use egui::{Context, Vec2};

use noveltyslice_panel::{Cond, GuiBackend, GuiError, Ui, Widgets};

/// Creates [`EguiUi`] contexts on an `egui::Context`.
#[derive(Debug, Clone)]
pub struct EguiBackend {
    ctx: Context,
}

impl EguiBackend {
    /// A backend drawing into `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

impl GuiBackend for EguiBackend {
    type Context = EguiUi;

    fn create_context(&mut self, name: &str) -> Result<EguiUi, GuiError> {
        tracing::debug!(name, "egui context created");
        Ok(EguiUi {
            ctx: self.ctx.clone(),
            next_size: None,
            focus_next: false,
        })
    }
}

/// Draws panel windows as `egui::Window`s.
#[derive(Debug)]
pub struct EguiUi {
    ctx: Context,
    next_size: Option<(Vec2, Cond)>,
    focus_next: bool,
}

impl Ui for EguiUi {
    fn set_next_window_size(&mut self, width: f32, height: f32, cond: Cond) {
        self.next_size = Some((Vec2::new(width, height), cond));
    }

    fn set_next_window_focus(&mut self) {
        self.focus_next = true;
    }

    fn window(
        &mut self,
        title: &str,
        open: &mut bool,
        contents: &mut dyn FnMut(&mut dyn Widgets),
    ) -> bool {
        let mut window = egui::Window::new(title).open(open);
        match self.next_size.take() {
            Some((size, Cond::FirstUseEver)) => window = window.default_size(size),
            Some((size, Cond::Always)) => window = window.fixed_size(size),
            None => {}
        }

        let Some(response) = window.show(&self.ctx, |ui| {
            contents(&mut EguiWidgets { ui });
        }) else {
            return false;
        };

        if std::mem::take(&mut self.focus_next) {
            self.ctx.move_to_top(response.response.layer_id);
        }
        response.inner.is_some()
    }
}

struct EguiWidgets<'a> {
    ui: &'a mut egui::Ui,
}

impl Widgets for EguiWidgets<'_> {
    fn button(&mut self, label: &str) -> bool {
        self.ui.button(label).clicked()
    }

    fn text(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn slider_int(&mut self, label: &str, value: &mut i32, min: i32, max: i32) -> bool {
        self.ui
            .add(egui::Slider::new(value, min..=max).text(label))
            .changed()
    }

    fn slider_f64(&mut self, label: &str, value: &mut f64, min: f64, max: f64) -> bool {
        self.ui
            .add(egui::Slider::new(value, min..=max).text(label))
            .changed()
    }
}
