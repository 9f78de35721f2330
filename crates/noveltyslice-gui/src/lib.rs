//! NoveltySlice GUI - standalone preview of the REAPER panel
//!
//! Runs the real [`Extension`](noveltyslice_panel::Extension) against a
//! [`SimulatedHost`](noveltyslice_host::SimulatedHost), drawing the panel
//! with egui instead of ReaImGui.

pub mod app;
pub mod egui_backend;
pub mod source;

pub use app::{PreviewApp, Selection};
pub use egui_backend::{EguiBackend, EguiUi};
