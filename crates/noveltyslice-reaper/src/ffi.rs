//! C ABI types shared with REAPER and ReaImGui.
//!
//! Layouts follow `reaper_plugin.h`. Only the fields and signatures the
//! extension touches are declared.

use std::ffi::{c_char, c_double, c_int, c_void};

/// Opaque window handle.
pub type Hwnd = *mut c_void;

/// Opaque module handle.
pub type Hinstance = *mut c_void;

/// `reaper_plugin_info_t`.
#[repr(C)]
#[derive(Debug)]
pub struct ReaperPluginInfo {
    /// `REAPER_PLUGIN_VERSION` of the running host.
    pub caller_version: c_int,
    /// Main window.
    pub hwnd_main: Hwnd,
    /// `Register(name, infostruct)`.
    pub register: Option<unsafe extern "C" fn(name: *const c_char, info: *mut c_void) -> c_int>,
    /// `GetFunc(name)`.
    pub get_func: Option<unsafe extern "C" fn(name: *const c_char) -> *mut c_void>,
}

/// `custom_action_register_t`.
#[repr(C)]
#[derive(Debug)]
pub struct CustomActionRegister {
    /// Action list section (0 = main).
    pub unique_section_id: c_int,
    /// Stable identifier.
    pub id_str: *const c_char,
    /// Display name.
    pub name: *const c_char,
    /// Reserved, must be null.
    pub extra: *mut c_void,
}

/// `hookcommand2` callback.
pub type HookCommand2 = unsafe extern "C" fn(
    section: *mut c_void,
    command: c_int,
    val: c_int,
    valhw: c_int,
    relmode: c_int,
    hwnd: Hwnd,
) -> bool;

/// `timer` callback.
pub type TimerCallback = unsafe extern "C" fn();

// ── REAPER API ──────────────────────────────────────────────────────────────

pub type PluginRegisterFn = unsafe extern "C" fn(name: *const c_char, info: *mut c_void) -> c_int;
pub type PluginGetApiFn = unsafe extern "C" fn(name: *const c_char) -> *mut c_void;
pub type ShowMessageBoxFn =
    unsafe extern "C" fn(msg: *const c_char, title: *const c_char, kind: c_int) -> c_int;
pub type ShowConsoleMsgFn = unsafe extern "C" fn(msg: *const c_char);
pub type GetSelectedMediaItemFn = unsafe extern "C" fn(proj: *mut c_void, index: c_int) -> *mut c_void;
pub type GetActiveTakeFn = unsafe extern "C" fn(item: *mut c_void) -> *mut c_void;
pub type GetMediaItemTakeSourceFn = unsafe extern "C" fn(take: *mut c_void) -> *mut c_void;
pub type GetMediaSourceSampleRateFn = unsafe extern "C" fn(source: *mut c_void) -> c_double;

// ── ReaImGui API ────────────────────────────────────────────────────────────

pub type ImGuiCreateContextFn =
    unsafe extern "C" fn(label: *const c_char, config_flags: *mut c_int) -> *mut c_void;
pub type ImGuiSetNextWindowSizeFn =
    unsafe extern "C" fn(ctx: *mut c_void, w: c_double, h: c_double, cond: *mut c_int);
pub type ImGuiSetNextWindowFocusFn = unsafe extern "C" fn(ctx: *mut c_void);
pub type ImGuiBeginFn = unsafe extern "C" fn(
    ctx: *mut c_void,
    name: *const c_char,
    open: *mut bool,
    flags: *mut c_int,
) -> bool;
pub type ImGuiEndFn = unsafe extern "C" fn(ctx: *mut c_void);
pub type ImGuiButtonFn = unsafe extern "C" fn(
    ctx: *mut c_void,
    label: *const c_char,
    w: *mut c_double,
    h: *mut c_double,
) -> bool;
pub type ImGuiTextFn = unsafe extern "C" fn(ctx: *mut c_void, text: *const c_char);
pub type ImGuiSliderIntFn = unsafe extern "C" fn(
    ctx: *mut c_void,
    label: *const c_char,
    value: *mut c_int,
    min: c_int,
    max: c_int,
    format: *const c_char,
    flags: *mut c_int,
) -> bool;
pub type ImGuiSliderDoubleFn = unsafe extern "C" fn(
    ctx: *mut c_void,
    label: *const c_char,
    value: *mut c_double,
    min: c_double,
    max: c_double,
    format: *const c_char,
    flags: *mut c_int,
) -> bool;

/// `ImGui_Cond_Always`.
pub const IMGUI_COND_ALWAYS: c_int = 1 << 0;

/// `ImGui_Cond_FirstUseEver`.
pub const IMGUI_COND_FIRST_USE_EVER: c_int = 1 << 2;
