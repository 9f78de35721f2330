//! Headless tests: the panel drawn with egui against the simulated host.

use egui::{Context, RawInput};
use noveltyslice_gui::{EguiBackend, PreviewApp, Selection};
use noveltyslice_host::SimulatedHost;
use noveltyslice_panel::{Extension, PanelConfig, STATUS_READY};

fn frame(ctx: &Context, f: impl FnMut(&Context)) {
    let _ = ctx.run(RawInput::default(), f);
}

#[test]
fn egui_backend_drives_panel_lifecycle() {
    let ctx = Context::default();
    let mut ext = Extension::new(
        SimulatedHost::with_selected_sample_rate(48000.0),
        EguiBackend::new(ctx.clone()),
        PanelConfig::default(),
    );
    let id = ext.install().unwrap();
    assert!(ext.on_command(id.0));
    assert!(ext.host().timer_registered());

    for _ in 0..3 {
        frame(&ctx, |_| ext.tick());
    }
    assert!(ext.is_open());
    assert_eq!(ext.panel().unwrap().status(), STATUS_READY);

    // Second invocation focuses the existing window.
    assert!(ext.on_command(id.0));
    frame(&ctx, |_| ext.tick());
    assert!(!ext.panel().unwrap().focus_pending());

    ext.shutdown();
    assert!(!ext.host().timer_registered());
}

#[test]
fn preview_app_installs_and_runs_action() {
    let ctx = Context::default();
    let selection = Selection {
        selected: true,
        sample_rate: 44100.0,
    };
    let mut app = PreviewApp::new(&ctx, SimulatedHost::new(), selection, PanelConfig::default());
    assert_eq!(app.extension().host().registered_actions().len(), 1);

    app.run_action();
    assert!(app.extension().is_open());
    assert_eq!(app.extension().host().timer_registrations(), 1);

    let rate = noveltyslice_panel::panel::selected_source_sample_rate(app.extension().host());
    assert_eq!(rate, Ok(44100.0));
}

#[test]
fn selection_can_be_cleared() {
    let host = SimulatedHost::with_selected_sample_rate(44100.0);
    Selection {
        selected: false,
        sample_rate: 44100.0,
    }
    .apply_to(&host);
    assert!(noveltyslice_panel::panel::selected_source_sample_rate(&host).is_err());
}
