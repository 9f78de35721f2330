//! [`Host`] over REAPER's C API.

use std::cell::{Cell, RefCell};
use std::ffi::{CStr, CString, c_void};
use std::ptr::{self, NonNull};

use noveltyslice_host::{
    ActionId, BindError, CustomAction, FunctionTable, Host, MessageBoxKind, PluginRecord,
};

use crate::ffi::{
    CustomActionRegister, GetActiveTakeFn, GetMediaItemTakeSourceFn, GetMediaSourceSampleRateFn,
    GetSelectedMediaItemFn, HookCommand2, PluginGetApiFn, PluginRegisterFn, ReaperPluginInfo,
    ShowConsoleMsgFn, ShowMessageBoxFn, TimerCallback,
};

/// A null-terminated copy of `s`. Interior NULs are dropped.
pub(crate) fn c_string(s: &str) -> CString {
    CString::new(s).unwrap_or_else(|e| {
        let mut bytes = e.into_vec();
        bytes.retain(|&b| b != 0);
        CString::new(bytes).unwrap_or_default()
    })
}

/// Reinterpret a resolved symbol as a function pointer of type `F`.
///
/// # Safety
///
/// `ptr` must point to a function whose ABI and signature match `F`.
#[allow(unsafe_code)]
pub(crate) unsafe fn cast_fn<F: Copy>(ptr: NonNull<c_void>) -> F {
    debug_assert_eq!(size_of::<F>(), size_of::<*mut c_void>());
    // SAFETY: caller guarantees `F` is a function pointer type matching the symbol.
    unsafe { std::mem::transmute_copy(&ptr.as_ptr()) }
}

/// The record REAPER passes to `ReaperPluginEntry`.
pub struct ReaperRecord<'a>(pub &'a ReaperPluginInfo);

impl PluginRecord for ReaperRecord<'_> {
    type Function = NonNull<c_void>;

    fn caller_version(&self) -> i32 {
        self.0.caller_version
    }

    #[allow(unsafe_code)]
    fn get_func(&self, name: &str) -> Option<NonNull<c_void>> {
        let get_func = self.0.get_func?;
        let name = c_string(name);
        // SAFETY: `GetFunc` takes a NUL-terminated name and returns null when unknown.
        NonNull::new(unsafe { get_func(name.as_ptr()) })
    }
}

/// Extension callbacks REAPER calls back into.
#[derive(Clone, Copy)]
pub struct Callbacks {
    /// Per-tick panel driver.
    pub timer: TimerCallback,
    /// Action dispatcher.
    pub hook_command: HookCommand2,
}

/// A REAPER media item.
#[derive(Debug, Clone, Copy)]
pub struct MediaItem(NonNull<c_void>);

/// A REAPER take.
#[derive(Debug, Clone, Copy)]
pub struct Take(NonNull<c_void>);

/// A REAPER PCM source.
#[derive(Debug, Clone, Copy)]
pub struct Source(NonNull<c_void>);

/// Registration storage REAPER may keep pointing into.
struct Registered {
    action: Box<CustomActionRegister>,
    _strings: [CString; 2],
}

/// REAPER's API, bound to typed function pointers.
pub struct ReaperApi {
    plugin_register: PluginRegisterFn,
    plugin_getapi: PluginGetApiFn,
    show_message_box: ShowMessageBoxFn,
    show_console_msg: ShowConsoleMsgFn,
    get_selected_media_item: GetSelectedMediaItemFn,
    get_active_take: GetActiveTakeFn,
    get_media_item_take_source: GetMediaItemTakeSourceFn,
    get_media_source_sample_rate: GetMediaSourceSampleRateFn,
    callbacks: Callbacks,
    hook_registered: Cell<bool>,
    actions: RefCell<Vec<Registered>>,
}

impl ReaperApi {
    /// Bind every function in a table produced by [`noveltyslice_host::load`].
    #[allow(unsafe_code)]
    pub fn bind(
        table: &FunctionTable<NonNull<c_void>>,
        callbacks: Callbacks,
    ) -> Result<Self, BindError> {
        // SAFETY: each name resolves to the REAPER function declared by the
        // matching `ffi` signature.
        unsafe {
            Ok(Self {
                plugin_register: cast_fn(table.require("plugin_register")?),
                plugin_getapi: cast_fn(table.require("plugin_getapi")?),
                show_message_box: cast_fn(table.require("ShowMessageBox")?),
                show_console_msg: cast_fn(table.require("ShowConsoleMsg")?),
                get_selected_media_item: cast_fn(table.require("GetSelectedMediaItem")?),
                get_active_take: cast_fn(table.require("GetActiveTake")?),
                get_media_item_take_source: cast_fn(table.require("GetMediaItemTake_Source")?),
                get_media_source_sample_rate: cast_fn(table.require("GetMediaSourceSampleRate")?),
                callbacks,
                hook_registered: Cell::new(false),
                actions: RefCell::new(Vec::new()),
            })
        }
    }

    /// `plugin_getapi`, for binding other extensions' exports.
    pub fn plugin_getapi(&self) -> PluginGetApiFn {
        self.plugin_getapi
    }

    /// `ShowConsoleMsg`, for the log writer.
    pub fn show_console_msg_fn(&self) -> ShowConsoleMsgFn {
        self.show_console_msg
    }

    #[allow(unsafe_code)]
    fn register(&self, name: &CStr, info: *mut c_void) -> i32 {
        // SAFETY: `plugin_register` accepts any registration name; `info`
        // matches what REAPER expects for `name`.
        unsafe { (self.plugin_register)(name.as_ptr(), info) }
    }

    fn timer_ptr(&self) -> *mut c_void {
        self.callbacks.timer as *mut c_void
    }

    /// Remove the command hook before the module is unloaded.
    pub fn unregister_command_hook(&self) {
        if self.hook_registered.replace(false) {
            self.register(c"-hookcommand2", self.callbacks.hook_command as *mut c_void);
        }
    }
}

impl Drop for ReaperApi {
    fn drop(&mut self) {
        self.unregister_command_hook();
    }
}

impl Host for ReaperApi {
    type MediaItem = MediaItem;
    type Take = Take;
    type Source = Source;

    #[allow(unsafe_code)]
    fn selected_media_item(&self, index: usize) -> Option<MediaItem> {
        let index = i32::try_from(index).ok()?;
        // SAFETY: a null project selects the active project.
        let item = unsafe { (self.get_selected_media_item)(ptr::null_mut(), index) };
        NonNull::new(item).map(MediaItem)
    }

    #[allow(unsafe_code)]
    fn active_take(&self, item: MediaItem) -> Option<Take> {
        // SAFETY: `item` came from `GetSelectedMediaItem` this callback.
        let take = unsafe { (self.get_active_take)(item.0.as_ptr()) };
        NonNull::new(take).map(Take)
    }

    #[allow(unsafe_code)]
    fn take_source(&self, take: Take) -> Option<Source> {
        // SAFETY: `take` came from `GetActiveTake` this callback.
        let source = unsafe { (self.get_media_item_take_source)(take.0.as_ptr()) };
        NonNull::new(source).map(Source)
    }

    #[allow(unsafe_code)]
    fn source_sample_rate(&self, source: Source) -> f64 {
        // SAFETY: `source` came from `GetMediaItemTake_Source` this callback.
        unsafe { (self.get_media_source_sample_rate)(source.0.as_ptr()) }
    }

    #[allow(unsafe_code)]
    fn show_message_box(&self, message: &str, title: &str, kind: MessageBoxKind) {
        let message = c_string(message);
        let title = c_string(title);
        // SAFETY: both strings are NUL-terminated and outlive the call.
        unsafe {
            (self.show_message_box)(message.as_ptr(), title.as_ptr(), kind.code());
        }
    }

    #[allow(unsafe_code)]
    fn show_console_msg(&self, message: &str) {
        let message = c_string(message);
        // SAFETY: NUL-terminated and outlives the call.
        unsafe { (self.show_console_msg)(message.as_ptr()) }
    }

    fn register_custom_action(&self, action: &CustomAction) -> Option<ActionId> {
        let id_str = c_string(action.id);
        let name = c_string(action.name);
        let mut registered = Registered {
            action: Box::new(CustomActionRegister {
                unique_section_id: action.section,
                id_str: id_str.as_ptr(),
                name: name.as_ptr(),
                extra: ptr::null_mut(),
            }),
            _strings: [id_str, name],
        };
        let info: *mut CustomActionRegister = &mut *registered.action;
        let command = self.register(c"custom_action", info.cast());
        if command == 0 {
            return None;
        }
        self.actions.borrow_mut().push(registered);
        Some(ActionId(command))
    }

    fn register_command_hook(&self) -> bool {
        let ok = self.register(c"hookcommand2", self.callbacks.hook_command as *mut c_void) != 0;
        self.hook_registered.set(ok);
        ok
    }

    fn register_timer(&self) {
        self.register(c"timer", self.timer_ptr());
    }

    fn unregister_timer(&self) {
        self.register(c"-timer", self.timer_ptr());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_char;

    #[test]
    fn c_string_strips_interior_nul() {
        assert_eq!(c_string("a\0b").as_bytes(), b"ab");
        assert_eq!(c_string("44100.000000").as_bytes(), b"44100.000000");
    }

    #[allow(unsafe_code)]
    unsafe extern "C" fn lookup(name: *const c_char) -> *mut c_void {
        // SAFETY: `c_string` always yields a NUL-terminated string.
        let name = unsafe { CStr::from_ptr(name) };
        if name == c"ShowConsoleMsg" {
            NonNull::<u8>::dangling().as_ptr().cast()
        } else {
            ptr::null_mut()
        }
    }

    #[test]
    fn record_resolves_through_get_func() {
        let info = ReaperPluginInfo {
            caller_version: noveltyslice_host::REAPER_PLUGIN_VERSION,
            hwnd_main: ptr::null_mut(),
            register: None,
            get_func: Some(lookup),
        };
        let record = ReaperRecord(&info);
        assert_eq!(record.caller_version(), 0x20E);
        assert!(record.get_func("ShowConsoleMsg").is_some());
        assert!(record.get_func("GetActiveTake").is_none());
    }

    #[test]
    fn record_without_get_func_resolves_nothing() {
        let info = ReaperPluginInfo {
            caller_version: 0x20E,
            hwnd_main: ptr::null_mut(),
            register: None,
            get_func: None,
        };
        assert!(ReaperRecord(&info).get_func("ShowConsoleMsg").is_none());
    }
}
