//! REAPER extension entry point for FluCoMa NoveltySlice.
//!
//! Built as a `cdylib` that REAPER loads from its `UserPlugins` directory.
//! This crate only translates between the C ABI and the safe
//! [`Extension`](noveltyslice_panel::Extension):
//!
//! - [`api`] - [`ReaperApi`], the [`Host`](noveltyslice_host::Host) over REAPER's function pointers
//! - [`imgui`] - [`ReaImGuiBackend`], the panel's GUI through ReaImGui
//! - [`console`] - `tracing` output to the REAPER console
//!
//! REAPER's timer callbacks carry no user pointer, so the one live extension
//! sits in a thread-local slot. Every callback runs on REAPER's UI thread. A
//! callback that arrives while the slot is borrowed (a timer firing under a
//! modal message box) is skipped.

pub mod api;
pub mod console;
mod ffi;
pub mod imgui;

use std::cell::RefCell;
use std::ffi::{c_int, c_void};

use noveltyslice_host::{ActionId, LoadError, load};
use noveltyslice_panel::{Extension, PanelConfig, paths};

pub use api::{Callbacks, ReaperApi, ReaperRecord};
pub use ffi::{Hinstance, Hwnd, ReaperPluginInfo};
pub use imgui::{ReaImGuiBackend, ReaImGuiContext};

type ReaperExtension = Extension<ReaperApi, ReaImGuiBackend>;

thread_local! {
    static EXTENSION: RefCell<Option<ReaperExtension>> = const { RefCell::new(None) };
}

/// Run `f` on the live extension, unless there is none or it is busy.
fn with_extension<R>(f: impl FnOnce(&mut ReaperExtension) -> R) -> Option<R> {
    EXTENSION.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            tracing::trace!("re-entrant callback skipped");
            return None;
        };
        slot.as_mut().map(f)
    })
}

extern "C" fn on_timer() {
    with_extension(Extension::tick);
}

extern "C" fn on_hook_command(
    _section: *mut c_void,
    command: c_int,
    _val: c_int,
    _valhw: c_int,
    _relmode: c_int,
    _hwnd: Hwnd,
) -> bool {
    with_extension(|ext| ext.on_command(command)).unwrap_or(false)
}

fn install(record: Option<&ReaperRecord<'_>>) -> Result<ActionId, LoadError> {
    let table = load(record)?;
    let api = ReaperApi::bind(
        &table,
        Callbacks {
            timer: on_timer,
            hook_command: on_hook_command,
        },
    )?;
    console::init(api.show_console_msg_fn());

    let config = PanelConfig::load_or_default(paths::config_file());
    let backend = ReaImGuiBackend::new(api.plugin_getapi());
    let mut extension = Extension::new(api, backend, config);
    let id = extension.install()?;

    unload();
    EXTENSION.with(|slot| *slot.borrow_mut() = Some(extension));
    Ok(id)
}

fn unload() {
    EXTENSION.with(|slot| {
        if let Ok(mut slot) = slot.try_borrow_mut()
            && let Some(mut extension) = slot.take()
        {
            extension.shutdown();
        }
    });
}

/// Entry point REAPER calls on load (valid `rec`) and unload (null `rec`).
///
/// Returns 1 when the extension is installed, 0 otherwise.
///
/// # Safety
///
/// `rec` must be null or point to a `reaper_plugin_info_t` valid for the call.
#[allow(unsafe_code, non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ReaperPluginEntry(
    _instance: Hinstance,
    rec: *mut ReaperPluginInfo,
) -> c_int {
    // SAFETY: REAPER passes null or a valid record, per the caller contract.
    let record = unsafe { rec.as_ref() }.map(ReaperRecord);

    if record.is_none() {
        unload();
    }

    match install(record.as_ref()) {
        Ok(id) => {
            tracing::debug!(command = id.0, "extension loaded");
            1
        }
        Err(LoadError::NullRecord) => 0,
        Err(e) => {
            tracing::error!(error = %e, "extension not loaded");
            0
        }
    }
}
