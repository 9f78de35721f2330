//! Panel lifecycle tests against the simulated host.
//!
//! A scripted GUI backend stands in for ReaImGui: each frame it records what
//! the panel drew and replays one-shot user input (button clicks, slider
//! drags, closing the window).

use std::cell::RefCell;
use std::rc::Rc;

use noveltyslice_host::{ActionId, MessageBoxKind, SimItem, SimulatedHost};
use noveltyslice_panel::{
    Cond, Extension, GuiBackend, GuiError, PLUGIN_NAME, PanelConfig, STATUS_APPLIED,
    STATUS_READY, Ui, Widgets,
};

/// One-shot input consumed by the next frame.
#[derive(Debug, Default)]
struct Script {
    click_apply: bool,
    close_window: bool,
    threshold: Option<f64>,
    kernel_size: Option<i32>,
}

#[derive(Debug, Default)]
struct Log {
    contexts_created: u32,
    contexts_dropped: u32,
    frames: u32,
    focus_requests: u32,
    sizes: Vec<(f32, f32, Cond)>,
    titles: Vec<String>,
    texts: Vec<String>,
}

struct MockUi {
    script: Rc<RefCell<Script>>,
    log: Rc<RefCell<Log>>,
}

impl Drop for MockUi {
    fn drop(&mut self) {
        self.log.borrow_mut().contexts_dropped += 1;
    }
}

struct MockWidgets<'a> {
    script: &'a mut Script,
    log: &'a mut Log,
}

impl Widgets for MockWidgets<'_> {
    fn button(&mut self, label: &str) -> bool {
        label == "Apply NoveltySlice" && std::mem::take(&mut self.script.click_apply)
    }

    fn text(&mut self, text: &str) {
        self.log.texts.push(text.to_owned());
    }

    fn slider_int(&mut self, label: &str, value: &mut i32, min: i32, max: i32) -> bool {
        assert!(min <= *value && *value <= max, "{label} out of range");
        match (label, self.script.kernel_size.take()) {
            ("Kernel Size", Some(v)) => {
                *value = v;
                true
            }
            _ => false,
        }
    }

    fn slider_f64(&mut self, label: &str, value: &mut f64, min: f64, max: f64) -> bool {
        assert!(min <= *value && *value <= max, "{label} out of range");
        match (label, self.script.threshold.take()) {
            ("Threshold", Some(v)) => {
                *value = v;
                true
            }
            _ => false,
        }
    }
}

impl Ui for MockUi {
    fn set_next_window_size(&mut self, width: f32, height: f32, cond: Cond) {
        self.log.borrow_mut().sizes.push((width, height, cond));
    }

    fn set_next_window_focus(&mut self) {
        self.log.borrow_mut().focus_requests += 1;
    }

    fn window(
        &mut self,
        title: &str,
        open: &mut bool,
        contents: &mut dyn FnMut(&mut dyn Widgets),
    ) -> bool {
        let mut script = self.script.borrow_mut();
        let mut log = self.log.borrow_mut();
        log.frames += 1;
        log.titles.push(title.to_owned());
        if std::mem::take(&mut script.close_window) {
            *open = false;
        }
        contents(&mut MockWidgets {
            script: &mut *script,
            log: &mut *log,
        });
        true
    }
}

#[derive(Default)]
struct MockBackend {
    script: Rc<RefCell<Script>>,
    log: Rc<RefCell<Log>>,
    fail: bool,
}

impl GuiBackend for MockBackend {
    type Context = MockUi;

    fn create_context(&mut self, name: &str) -> Result<MockUi, GuiError> {
        if self.fail {
            return Err(GuiError::Unavailable(name.to_owned()));
        }
        self.log.borrow_mut().contexts_created += 1;
        Ok(MockUi {
            script: Rc::clone(&self.script),
            log: Rc::clone(&self.log),
        })
    }
}

struct Harness {
    ext: Extension<SimulatedHost, MockBackend>,
    command: ActionId,
    script: Rc<RefCell<Script>>,
    log: Rc<RefCell<Log>>,
}

impl Harness {
    fn with(host: SimulatedHost, config: PanelConfig) -> Self {
        let backend = MockBackend::default();
        let script = Rc::clone(&backend.script);
        let log = Rc::clone(&backend.log);
        let mut ext = Extension::new(host, backend, config);
        let command = ext.install().unwrap();
        Self {
            ext,
            command,
            script,
            log,
        }
    }

    fn new() -> Self {
        Self::with(SimulatedHost::new(), PanelConfig::default())
    }

    fn invoke(&mut self) -> bool {
        self.ext.on_command(self.command.0)
    }

    fn host(&self) -> &SimulatedHost {
        self.ext.host()
    }

    fn status(&self) -> String {
        self.ext.panel().unwrap().status().to_owned()
    }
}

// --- lifecycle ---

#[test]
fn install_registers_action_and_hook() {
    let h = Harness::new();
    let actions = h.host().registered_actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].0.id, "FLUCOMA_NOVELTYSLICE");
    assert_eq!(actions[0].0.section, 0);
    assert_eq!(h.ext.command_id(), Some(h.command));
    assert!(h.host().hook_registered());
    assert!(!h.ext.is_open());
    assert!(!h.host().timer_registered());
}

#[test]
fn first_invocation_creates_one_panel_and_one_timer() {
    let mut h = Harness::new();
    assert!(h.invoke());
    assert!(h.ext.is_open());
    assert_eq!(h.log.borrow().contexts_created, 1);
    assert_eq!(h.host().timer_registrations(), 1);
    assert_eq!(h.status(), STATUS_READY);
}

#[test]
fn second_invocation_only_requests_focus() {
    let mut h = Harness::new();
    h.invoke();
    h.invoke();
    assert_eq!(h.log.borrow().contexts_created, 1);
    assert_eq!(h.host().timer_registrations(), 1);
    assert_eq!(h.host().active_timers(), 1);
    assert!(h.ext.panel().unwrap().focus_pending());

    h.ext.tick();
    assert_eq!(h.log.borrow().focus_requests, 1);
    assert!(!h.ext.panel().unwrap().focus_pending());

    h.ext.tick();
    assert_eq!(h.log.borrow().focus_requests, 1);
}

#[test]
fn closing_window_unregisters_timer_and_frees_panel() {
    let mut h = Harness::new();
    h.invoke();
    h.ext.tick();
    h.script.borrow_mut().close_window = true;
    h.ext.tick();

    assert!(!h.ext.is_open());
    assert_eq!(h.host().timer_unregistrations(), 1);
    assert!(!h.host().timer_registered());
    assert_eq!(h.log.borrow().contexts_dropped, 1);

    let frames = h.log.borrow().frames;
    h.ext.tick();
    assert_eq!(h.log.borrow().frames, frames);
}

#[test]
fn reopening_after_close_creates_a_fresh_panel() {
    let mut h = Harness::new();
    h.invoke();
    h.script.borrow_mut().close_window = true;
    h.ext.tick();
    h.invoke();

    assert!(h.ext.is_open());
    assert_eq!(h.log.borrow().contexts_created, 2);
    assert_eq!(h.host().active_timers(), 1);
    assert_eq!(h.status(), STATUS_READY);
}

#[test]
fn tick_without_panel_is_noop() {
    let mut h = Harness::new();
    h.ext.tick();
    assert_eq!(h.log.borrow().frames, 0);
    assert!(!h.host().timer_registered());
}

#[test]
fn shutdown_tears_down_open_panel() {
    let mut h = Harness::new();
    h.invoke();
    h.ext.shutdown();
    assert!(!h.ext.is_open());
    assert!(!h.host().timer_registered());
    assert_eq!(h.log.borrow().contexts_dropped, 1);

    // Idempotent.
    h.ext.shutdown();
    assert_eq!(h.host().timer_unregistrations(), 1);
}

#[test]
fn foreign_commands_are_ignored() {
    let mut h = Harness::new();
    assert!(!h.ext.on_command(h.command.0 + 1));
    assert!(!h.ext.is_open());
}

#[test]
fn commands_before_install_are_ignored() {
    let mut ext = Extension::new(
        SimulatedHost::new(),
        MockBackend::default(),
        PanelConfig::default(),
    );
    assert!(!ext.on_command(50_000));
    assert!(!ext.is_open());
}

#[test]
fn refused_action_fails_install() {
    let host = SimulatedHost::new();
    host.refuse_action_registration(true);
    let mut ext = Extension::new(host, MockBackend::default(), PanelConfig::default());
    assert!(ext.install().is_err());
    assert_eq!(ext.command_id(), None);
    assert!(!ext.host().hook_registered());
}

#[test]
fn context_failure_is_reported_without_timer() {
    let backend = MockBackend {
        fail: true,
        ..MockBackend::default()
    };
    let mut ext = Extension::new(SimulatedHost::new(), backend, PanelConfig::default());
    let command = ext.install().unwrap();

    assert!(ext.on_command(command.0));
    assert!(!ext.is_open());
    assert!(!ext.host().timer_registered());
    let boxes = ext.host().message_boxes();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].title, PLUGIN_NAME);
    assert!(boxes[0].message.contains("GUI library unavailable"));
}

// --- frame ---

#[test]
fn frame_draws_titled_window_at_configured_size() {
    let mut h = Harness::new();
    h.invoke();
    h.ext.tick();

    let log = h.log.borrow();
    assert_eq!(log.titles, vec![PLUGIN_NAME.to_owned()]);
    assert_eq!(log.sizes, vec![(400.0, 150.0, Cond::FirstUseEver)]);
    assert_eq!(log.texts, vec![STATUS_READY.to_owned()]);
}

#[test]
fn custom_window_size_from_config() {
    let mut config = PanelConfig::default();
    config.window.width = 640.0;
    config.window.height = 200.0;
    let mut h = Harness::with(SimulatedHost::new(), config);
    h.invoke();
    h.ext.tick();
    assert_eq!(h.log.borrow().sizes[0], (640.0, 200.0, Cond::FirstUseEver));
}

#[test]
fn sliders_edit_analysis_params() {
    let mut h = Harness::new();
    h.invoke();
    {
        let mut script = h.script.borrow_mut();
        script.threshold = Some(0.25);
        script.kernel_size = Some(10);
    }
    h.ext.tick();

    let params = h.ext.panel().unwrap().client().params();
    assert_eq!(params.threshold, 0.25);
    // Even kernel sizes snap to odd.
    assert_eq!(params.kernel_size, 11);
}

#[test]
fn config_params_reach_client() {
    let mut config = PanelConfig::default();
    config.analysis.set_kernel_size(21);
    let mut h = Harness::with(SimulatedHost::new(), config);
    h.invoke();
    assert_eq!(h.ext.panel().unwrap().client().params().kernel_size, 21);
}

// --- apply ---

#[test]
fn apply_without_selection_sets_failure_status() {
    let mut h = Harness::new();
    h.invoke();
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();

    assert_eq!(
        h.status(),
        "Failed to apply NoveltySlice: no media item selected"
    );
    assert!(h.host().message_boxes().is_empty());
    assert_eq!(h.log.borrow().texts.last().unwrap(), &h.status());
}

#[test]
fn apply_without_take_or_source() {
    let mut h = Harness::new();
    h.invoke();

    h.host().select(SimItem::empty());
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();
    assert_eq!(
        h.status(),
        "Failed to apply NoveltySlice: selected item has no active take"
    );

    h.host().select(SimItem::without_source());
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();
    assert_eq!(
        h.status(),
        "Failed to apply NoveltySlice: active take has no source"
    );
    assert!(h.host().message_boxes().is_empty());
}

#[test]
fn apply_with_source_shows_sample_rate() {
    let mut h = Harness::with(
        SimulatedHost::with_selected_sample_rate(44100.0),
        PanelConfig::default(),
    );
    h.invoke();
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();

    assert_eq!(h.status(), STATUS_APPLIED);
    let boxes = h.host().message_boxes();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].message, "44100.000000");
    assert_eq!(boxes[0].title, PLUGIN_NAME);
    assert_eq!(boxes[0].kind, MessageBoxKind::Ok);
}

#[test]
fn failure_after_success_replaces_status() {
    let mut h = Harness::with(
        SimulatedHost::with_selected_sample_rate(48000.0),
        PanelConfig::default(),
    );
    h.invoke();
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();
    assert_eq!(h.status(), STATUS_APPLIED);

    h.host().clear_selection();
    h.script.borrow_mut().click_apply = true;
    h.ext.tick();
    assert_eq!(
        h.status(),
        "Failed to apply NoveltySlice: no media item selected"
    );
    assert_eq!(h.host().message_boxes().len(), 1);
}

#[test]
fn apply_can_run_outside_a_frame() {
    let mut h = Harness::with(
        SimulatedHost::with_selected_sample_rate(22050.0),
        PanelConfig::default(),
    );
    h.invoke();
    let host = SimulatedHost::with_selected_sample_rate(96000.0);
    let status = h.ext.panel_mut().unwrap().apply(&host).to_owned();
    assert_eq!(status, STATUS_APPLIED);
    assert_eq!(host.message_boxes()[0].message, "96000.000000");
    assert!(h.host().message_boxes().is_empty());
}

// --- console trace ---

#[test]
fn console_trace_follows_lifecycle() {
    let mut h = Harness::new();
    h.invoke();
    h.invoke();
    h.script.borrow_mut().close_window = true;
    h.ext.tick();

    let console = h.host().console_output().clone();
    assert_eq!(
        console,
        "NoveltySlice: panel created\n\
         NoveltySlice: panel already open, focusing\n\
         NoveltySlice: panel closed\n"
    );
}

#[test]
fn console_trace_can_be_disabled() {
    let config = PanelConfig {
        console_trace: false,
        ..PanelConfig::default()
    };
    let mut h = Harness::with(SimulatedHost::new(), config);
    h.invoke();
    h.ext.tick();
    assert!(h.host().console_output().is_empty());
}
