//! In-memory host for tests and the standalone preview.
//!
//! [`SimulatedHost`] keeps a small media graph (selected items, their active
//! takes and sources) and records every side effect the extension causes:
//! message boxes, console text, timer and action registrations.

use std::cell::{Cell, Ref, RefCell};

use crate::binding::{PluginRecord, REAPER_PLUGIN_VERSION, REQUIRED_FUNCTIONS};
use crate::host::{ActionId, CustomAction, Host, MessageBoxKind};

/// First command id handed out, in the range REAPER uses for extensions.
const FIRST_COMMAND_ID: i32 = 50_000;

/// A PCM source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimSource {
    /// Sample rate in Hz.
    pub sample_rate: f64,
}

/// A take, optionally referencing a source.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimTake {
    /// The take's source.
    pub source: Option<SimSource>,
}

/// A media item, optionally with an active take.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimItem {
    /// The item's active take.
    pub active_take: Option<SimTake>,
}

impl SimItem {
    /// An item whose active take plays a source at `sample_rate`.
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        Self {
            active_take: Some(SimTake {
                source: Some(SimSource { sample_rate }),
            }),
        }
    }

    /// An item with no takes.
    pub fn empty() -> Self {
        Self { active_take: None }
    }

    /// An item whose active take has no source.
    pub fn without_source() -> Self {
        Self {
            active_take: Some(SimTake { source: None }),
        }
    }
}

/// A message box the extension showed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    /// Body text.
    pub message: String,
    /// Window title.
    pub title: String,
    /// Button layout.
    pub kind: MessageBoxKind,
}

/// In-memory [`Host`].
#[derive(Debug)]
pub struct SimulatedHost {
    selected: RefCell<Vec<SimItem>>,
    message_boxes: RefCell<Vec<MessageBox>>,
    console: RefCell<String>,
    actions: RefCell<Vec<(CustomAction, ActionId)>>,
    hook_registered: Cell<bool>,
    timer_active: Cell<u32>,
    timer_registrations: Cell<u32>,
    timer_unregistrations: Cell<u32>,
    refuse_actions: Cell<bool>,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedHost {
    /// A host with nothing selected.
    pub fn new() -> Self {
        Self {
            selected: RefCell::new(Vec::new()),
            message_boxes: RefCell::new(Vec::new()),
            console: RefCell::new(String::new()),
            actions: RefCell::new(Vec::new()),
            hook_registered: Cell::new(false),
            timer_active: Cell::new(0),
            timer_registrations: Cell::new(0),
            timer_unregistrations: Cell::new(0),
            refuse_actions: Cell::new(false),
        }
    }

    /// A host with one selected item playing a source at `sample_rate`.
    pub fn with_selected_sample_rate(sample_rate: f64) -> Self {
        let host = Self::new();
        host.select(SimItem::with_sample_rate(sample_rate));
        host
    }

    /// Replace the selection with a single item.
    pub fn select(&self, item: SimItem) {
        *self.selected.borrow_mut() = vec![item];
    }

    /// Deselect everything.
    pub fn clear_selection(&self) {
        self.selected.borrow_mut().clear();
    }

    /// Make `register_custom_action` fail.
    pub fn refuse_action_registration(&self, refuse: bool) {
        self.refuse_actions.set(refuse);
    }

    /// Message boxes shown so far.
    pub fn message_boxes(&self) -> Ref<'_, Vec<MessageBox>> {
        self.message_boxes.borrow()
    }

    /// Everything written to the console.
    pub fn console_output(&self) -> Ref<'_, String> {
        self.console.borrow()
    }

    /// Registered actions with their command ids.
    pub fn registered_actions(&self) -> Vec<(CustomAction, ActionId)> {
        self.actions.borrow().clone()
    }

    /// Whether the command hook is installed.
    pub fn hook_registered(&self) -> bool {
        self.hook_registered.get()
    }

    /// Whether a timer callback is currently registered.
    pub fn timer_registered(&self) -> bool {
        self.timer_active.get() > 0
    }

    /// Number of timer callbacks currently registered.
    pub fn active_timers(&self) -> u32 {
        self.timer_active.get()
    }

    /// Total `register_timer` calls.
    pub fn timer_registrations(&self) -> u32 {
        self.timer_registrations.get()
    }

    /// Total `unregister_timer` calls.
    pub fn timer_unregistrations(&self) -> u32 {
        self.timer_unregistrations.get()
    }

    /// Whether the host recorded any registration at all.
    pub fn registered_anything(&self) -> bool {
        !self.actions.borrow().is_empty()
            || self.hook_registered.get()
            || self.timer_registrations.get() > 0
    }
}

impl Host for SimulatedHost {
    type MediaItem = usize;
    type Take = usize;
    type Source = usize;

    fn selected_media_item(&self, index: usize) -> Option<usize> {
        (index < self.selected.borrow().len()).then_some(index)
    }

    fn active_take(&self, item: usize) -> Option<usize> {
        self.selected
            .borrow()
            .get(item)
            .and_then(|i| i.active_take)
            .map(|_| item)
    }

    fn take_source(&self, take: usize) -> Option<usize> {
        self.selected
            .borrow()
            .get(take)
            .and_then(|i| i.active_take)
            .and_then(|t| t.source)
            .map(|_| take)
    }

    fn source_sample_rate(&self, source: usize) -> f64 {
        self.selected
            .borrow()
            .get(source)
            .and_then(|i| i.active_take)
            .and_then(|t| t.source)
            .map_or(0.0, |s| s.sample_rate)
    }

    fn show_message_box(&self, message: &str, title: &str, kind: MessageBoxKind) {
        self.message_boxes.borrow_mut().push(MessageBox {
            message: message.to_owned(),
            title: title.to_owned(),
            kind,
        });
    }

    fn show_console_msg(&self, message: &str) {
        self.console.borrow_mut().push_str(message);
    }

    fn register_custom_action(&self, action: &CustomAction) -> Option<ActionId> {
        if self.refuse_actions.get() {
            return None;
        }
        let mut actions = self.actions.borrow_mut();
        let id = ActionId(FIRST_COMMAND_ID + actions.len() as i32);
        actions.push((*action, id));
        Some(id)
    }

    fn register_command_hook(&self) -> bool {
        self.hook_registered.set(true);
        true
    }

    fn register_timer(&self) {
        self.timer_active.set(self.timer_active.get() + 1);
        self.timer_registrations.set(self.timer_registrations.get() + 1);
    }

    fn unregister_timer(&self) {
        self.timer_active.set(self.timer_active.get().saturating_sub(1));
        self.timer_unregistrations
            .set(self.timer_unregistrations.get() + 1);
    }
}

/// A [`PluginRecord`] for [`SimulatedHost`]: a version plus the set of names
/// the lookup knows.
#[derive(Debug, Clone)]
pub struct SimulatedRecord {
    version: i32,
    available: Vec<&'static str>,
}

impl SimulatedRecord {
    /// A record at the expected ABI version providing every required function.
    pub fn complete() -> Self {
        Self {
            version: REAPER_PLUGIN_VERSION,
            available: REQUIRED_FUNCTIONS.to_vec(),
        }
    }

    /// Override the reported ABI version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Drop a function from the lookup.
    pub fn without(mut self, name: &str) -> Self {
        self.available.retain(|&n| n != name);
        self
    }
}

impl PluginRecord for SimulatedRecord {
    type Function = ();

    fn caller_version(&self) -> i32 {
        self.version
    }

    fn get_func(&self, name: &str) -> Option<()> {
        self.available.contains(&name).then_some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_chain_follows_selection() {
        let host = SimulatedHost::with_selected_sample_rate(44100.0);
        let item = host.selected_media_item(0).unwrap();
        let take = host.active_take(item).unwrap();
        let source = host.take_source(take).unwrap();
        assert_eq!(host.source_sample_rate(source), 44100.0);
        assert_eq!(host.selected_media_item(1), None);
    }

    #[test]
    fn missing_links_short_circuit() {
        let host = SimulatedHost::new();
        assert_eq!(host.selected_media_item(0), None);

        host.select(SimItem::empty());
        assert_eq!(host.active_take(0), None);

        host.select(SimItem::without_source());
        assert_eq!(host.take_source(0), None);
    }

    #[test]
    fn records_side_effects() {
        let host = SimulatedHost::new();
        host.show_message_box("hi", "title", MessageBoxKind::Ok);
        host.show_console_msg("a\n");
        host.show_console_msg("b\n");
        assert_eq!(host.message_boxes().len(), 1);
        assert_eq!(host.message_boxes()[0].message, "hi");
        assert_eq!(&*host.console_output(), "a\nb\n");
    }

    #[test]
    fn timer_counts() {
        let host = SimulatedHost::new();
        host.register_timer();
        assert!(host.timer_registered());
        host.unregister_timer();
        host.unregister_timer();
        assert!(!host.timer_registered());
        assert_eq!(host.timer_registrations(), 1);
        assert_eq!(host.timer_unregistrations(), 2);
    }

    #[test]
    fn actions_get_sequential_ids() {
        let host = SimulatedHost::new();
        let action = CustomAction {
            section: 0,
            id: "A",
            name: "a",
        };
        assert_eq!(host.register_custom_action(&action), Some(ActionId(50_000)));
        assert_eq!(host.register_custom_action(&action), Some(ActionId(50_001)));

        host.refuse_action_registration(true);
        assert_eq!(host.register_custom_action(&action), None);
    }

    #[test]
    fn record_lookup() {
        let record = SimulatedRecord::complete().without("ShowConsoleMsg");
        assert_eq!(record.get_func("ShowMessageBox"), Some(()));
        assert_eq!(record.get_func("ShowConsoleMsg"), None);
        assert_eq!(record.with_version(1).caller_version(), 1);
    }
}
