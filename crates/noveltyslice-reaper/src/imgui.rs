//! [`GuiBackend`] over ReaImGui.
//!
//! ReaImGui exports its API through `plugin_getapi`. Functions are resolved
//! on first context creation so the extension still loads when ReaImGui is
//! missing; opening the panel then fails with [`GuiError::Unavailable`].
//!
//! ReaImGui has no explicit context destructor: a context that goes one
//! frame without `ImGui_Begin` is reclaimed by the library, so dropping a
//! [`ReaImGuiContext`] simply stops using it.

use std::ffi::{CStr, c_int, c_void};
use std::ptr::{self, NonNull};
use std::rc::Rc;

use noveltyslice_panel::{Cond, GuiBackend, GuiError, Ui, Widgets};

use crate::api::{c_string, cast_fn};
use crate::ffi::{
    IMGUI_COND_ALWAYS, IMGUI_COND_FIRST_USE_EVER, ImGuiBeginFn, ImGuiButtonFn,
    ImGuiCreateContextFn, ImGuiEndFn, ImGuiSetNextWindowFocusFn, ImGuiSetNextWindowSizeFn,
    ImGuiSliderDoubleFn, ImGuiSliderIntFn, ImGuiTextFn, PluginGetApiFn,
};

struct ImGuiApi {
    create_context: ImGuiCreateContextFn,
    set_next_window_size: ImGuiSetNextWindowSizeFn,
    set_next_window_focus: ImGuiSetNextWindowFocusFn,
    begin: ImGuiBeginFn,
    end: ImGuiEndFn,
    button: ImGuiButtonFn,
    text: ImGuiTextFn,
    slider_int: ImGuiSliderIntFn,
    slider_double: ImGuiSliderDoubleFn,
}

impl ImGuiApi {
    #[allow(unsafe_code)]
    fn resolve(getapi: PluginGetApiFn) -> Result<Self, GuiError> {
        let lookup = |name: &CStr| {
            // SAFETY: `plugin_getapi` takes a NUL-terminated name and returns
            // null for unknown exports.
            NonNull::new(unsafe { getapi(name.as_ptr()) })
                .ok_or_else(|| GuiError::Unavailable(name.to_string_lossy().into_owned()))
        };
        // SAFETY: each export has the signature declared in `ffi`.
        unsafe {
            Ok(Self {
                create_context: cast_fn(lookup(c"ImGui_CreateContext")?),
                set_next_window_size: cast_fn(lookup(c"ImGui_SetNextWindowSize")?),
                set_next_window_focus: cast_fn(lookup(c"ImGui_SetNextWindowFocus")?),
                begin: cast_fn(lookup(c"ImGui_Begin")?),
                end: cast_fn(lookup(c"ImGui_End")?),
                button: cast_fn(lookup(c"ImGui_Button")?),
                text: cast_fn(lookup(c"ImGui_Text")?),
                slider_int: cast_fn(lookup(c"ImGui_SliderInt")?),
                slider_double: cast_fn(lookup(c"ImGui_SliderDouble")?),
            })
        }
    }
}

/// Creates ReaImGui contexts.
pub struct ReaImGuiBackend {
    getapi: PluginGetApiFn,
    api: Option<Rc<ImGuiApi>>,
}

impl ReaImGuiBackend {
    /// A backend resolving ReaImGui through `plugin_getapi`.
    pub fn new(getapi: PluginGetApiFn) -> Self {
        Self { getapi, api: None }
    }

    fn api(&mut self) -> Result<Rc<ImGuiApi>, GuiError> {
        if let Some(api) = &self.api {
            return Ok(Rc::clone(api));
        }
        let api = Rc::new(ImGuiApi::resolve(self.getapi)?);
        self.api = Some(Rc::clone(&api));
        Ok(api)
    }
}

impl GuiBackend for ReaImGuiBackend {
    type Context = ReaImGuiContext;

    #[allow(unsafe_code)]
    fn create_context(&mut self, name: &str) -> Result<ReaImGuiContext, GuiError> {
        let api = self.api()?;
        let label = c_string(name);
        // SAFETY: label is NUL-terminated; null config flags select defaults.
        let ctx = unsafe { (api.create_context)(label.as_ptr(), ptr::null_mut()) };
        let ctx = NonNull::new(ctx).ok_or_else(|| GuiError::ContextCreation(name.to_owned()))?;
        Ok(ReaImGuiContext { api, ctx })
    }
}

/// A live ReaImGui context.
pub struct ReaImGuiContext {
    api: Rc<ImGuiApi>,
    ctx: NonNull<c_void>,
}

impl Ui for ReaImGuiContext {
    #[allow(unsafe_code)]
    fn set_next_window_size(&mut self, width: f32, height: f32, cond: Cond) {
        let mut cond = match cond {
            Cond::Always => IMGUI_COND_ALWAYS,
            Cond::FirstUseEver => IMGUI_COND_FIRST_USE_EVER,
        };
        // SAFETY: `ctx` is live; `cond` outlives the call.
        unsafe {
            (self.api.set_next_window_size)(
                self.ctx.as_ptr(),
                f64::from(width),
                f64::from(height),
                &mut cond,
            );
        }
    }

    #[allow(unsafe_code)]
    fn set_next_window_focus(&mut self) {
        // SAFETY: `ctx` is live.
        unsafe { (self.api.set_next_window_focus)(self.ctx.as_ptr()) }
    }

    #[allow(unsafe_code)]
    fn window(
        &mut self,
        title: &str,
        open: &mut bool,
        contents: &mut dyn FnMut(&mut dyn Widgets),
    ) -> bool {
        let title = c_string(title);
        // SAFETY: `ctx` is live; `open` is a valid in/out flag.
        let visible =
            unsafe { (self.api.begin)(self.ctx.as_ptr(), title.as_ptr(), open, ptr::null_mut()) };
        if visible {
            contents(&mut Frame {
                api: &self.api,
                ctx: self.ctx.as_ptr(),
            });
            // SAFETY: `Begin` returned true, so `End` must be called once.
            unsafe { (self.api.end)(self.ctx.as_ptr()) }
        }
        visible
    }
}

struct Frame<'a> {
    api: &'a ImGuiApi,
    ctx: *mut c_void,
}

impl Widgets for Frame<'_> {
    #[allow(unsafe_code)]
    fn button(&mut self, label: &str) -> bool {
        let label = c_string(label);
        // SAFETY: inside Begin/End; null sizes select auto sizing.
        unsafe { (self.api.button)(self.ctx, label.as_ptr(), ptr::null_mut(), ptr::null_mut()) }
    }

    #[allow(unsafe_code)]
    fn text(&mut self, text: &str) {
        let text = c_string(text);
        // SAFETY: inside Begin/End.
        unsafe { (self.api.text)(self.ctx, text.as_ptr()) }
    }

    #[allow(unsafe_code)]
    fn slider_int(&mut self, label: &str, value: &mut i32, min: i32, max: i32) -> bool {
        let label = c_string(label);
        let mut v: c_int = *value;
        // SAFETY: inside Begin/End; null format and flags select defaults.
        let changed = unsafe {
            (self.api.slider_int)(
                self.ctx,
                label.as_ptr(),
                &mut v,
                min,
                max,
                ptr::null(),
                ptr::null_mut(),
            )
        };
        *value = v;
        changed
    }

    #[allow(unsafe_code)]
    fn slider_f64(&mut self, label: &str, value: &mut f64, min: f64, max: f64) -> bool {
        let label = c_string(label);
        // SAFETY: inside Begin/End; null format and flags select defaults.
        unsafe {
            (self.api.slider_double)(
                self.ctx,
                label.as_ptr(),
                value,
                min,
                max,
                ptr::null(),
                ptr::null_mut(),
            )
        }
    }
}
