//! NoveltySlice GUI - preview the REAPER panel without REAPER.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use noveltyslice_gui::{PreviewApp, Selection, source};
use noveltyslice_host::SimulatedHost;
use noveltyslice_panel::{PanelConfig, paths};

/// NoveltySlice panel preview.
#[derive(Parser, Debug)]
#[command(name = "noveltyslice-gui")]
#[command(about = "Preview the FluCoMa NoveltySlice panel against a simulated REAPER")]
#[command(version)]
struct Args {
    /// Sample rate of the selected item's source in Hz
    #[arg(long, default_value = "44100")]
    sample_rate: f64,

    /// Start with nothing selected
    #[arg(long)]
    no_selection: bool,

    /// WAV file whose header sample rate the selected item reports
    #[arg(long, conflicts_with = "no_selection")]
    source: Option<PathBuf>,

    /// Panel config file (default: the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective config back to the config file before starting
    #[arg(long)]
    write_config: bool,
}

fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // Initialize tracing subscriber; init also bridges log:: calls from eframe/egui
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut selection = Selection {
        selected: !args.no_selection,
        sample_rate: args.sample_rate,
    };
    if let Some(path) = &args.source {
        match source::wav_sample_rate(path) {
            Ok(rate) => selection.sample_rate = f64::from(rate),
            Err(e) => tracing::error!(error = %e, "using --sample-rate instead"),
        }
    }

    let config_path = args.config.clone().unwrap_or_else(paths::config_file);
    let config = PanelConfig::load_or_default(&config_path);
    if args.write_config {
        match config.save(&config_path) {
            Ok(()) => tracing::info!(path = %config_path.display(), "config written"),
            Err(e) => tracing::error!(error = %e, "failed to write config"),
        }
    }

    tracing::info!("Starting NoveltySlice preview");
    tracing::info!(config = %config_path.display(), "config");
    tracing::info!(selected = selection.selected, sample_rate = selection.sample_rate, "selection");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([640.0, 400.0])
            .with_title("NoveltySlice Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "NoveltySlice Preview",
        options,
        Box::new(move |cc| {
            Ok(Box::new(PreviewApp::new(
                &cc.egui_ctx,
                SimulatedHost::new(),
                selection,
                config,
            )))
        }),
    )
}
