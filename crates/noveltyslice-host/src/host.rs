//! The host capability interface.
//!
//! [`Host`] is the set of DAW operations the extension uses. The C ABI shim
//! implements it over resolved REAPER function pointers; [`SimulatedHost`]
//! implements it in memory for tests and the standalone preview.
//!
//! All methods run on the host's UI thread. Implementations take `&self`
//! because REAPER's API is a bag of free functions with no exclusive owner.
//!
//! [`SimulatedHost`]: crate::SimulatedHost

/// Numeric command id the host assigned to a registered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub i32);

/// A custom action to register with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomAction {
    /// Action list section (0 = main).
    pub section: i32,
    /// Stable identifier string, unique across extensions.
    pub id: &'static str,
    /// Display name in the action list.
    pub name: &'static str,
}

/// Message box button layout. The extension only ever shows plain notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageBoxKind {
    /// A single OK button.
    #[default]
    Ok,
}

impl MessageBoxKind {
    /// Raw `ShowMessageBox` type code.
    pub const fn code(self) -> i32 {
        match self {
            MessageBoxKind::Ok => 0,
        }
    }
}

/// DAW operations consumed by the extension.
pub trait Host {
    /// Handle to a media item.
    type MediaItem: Copy;
    /// Handle to a take within an item.
    type Take: Copy;
    /// Handle to a take's PCM source.
    type Source: Copy;

    /// The `index`-th selected media item of the current project.
    fn selected_media_item(&self, index: usize) -> Option<Self::MediaItem>;

    /// The item's active take.
    fn active_take(&self, item: Self::MediaItem) -> Option<Self::Take>;

    /// The take's audio source.
    fn take_source(&self, take: Self::Take) -> Option<Self::Source>;

    /// Sample rate of a source in Hz.
    fn source_sample_rate(&self, source: Self::Source) -> f64;

    /// Show a modal message box.
    fn show_message_box(&self, message: &str, title: &str, kind: MessageBoxKind);

    /// Append text to the host console.
    fn show_console_msg(&self, message: &str);

    /// Register a custom action, returning its assigned command id.
    fn register_custom_action(&self, action: &CustomAction) -> Option<ActionId>;

    /// Install the command hook that routes action invocations to the extension.
    fn register_command_hook(&self) -> bool;

    /// Start receiving timer ticks.
    fn register_timer(&self);

    /// Stop receiving timer ticks.
    fn unregister_timer(&self);
}
