//! Keyview command-line front end.
//!
//! Loads a device snapshot, fits its physical layout into a viewport and
//! answers geometry queries about it.
//!
//! # Usage
//!
//! ```text
//! keyview [OPTIONS] <SNAPSHOT> <COMMAND>
//!
//! Commands:
//!   layouts            List the device's physical layouts
//!   bounds             Print the layout's bounding box in key units
//!   fit                Print the viewport transform
//!   hit <X> <Y>        Report the key under viewport pixel (X, Y)
//!   inspect <INDEX>    Show details for one key
//!
//! Options:
//!   --width   <PX>     Viewport width  [config: display.viewport_width]
//!   --height  <PX>     Viewport height [config: display.viewport_height]
//!   --padding <PX>     Viewport padding [config: display.padding]
//!   --layout  <INDEX>  Physical layout to show [config: ui.selected_layout_index]
//! ```
//!
//! Command-line values take precedence over the config file.  The chosen
//! layout and device name are written back to the config afterwards.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use keyview_app::application::connection::LockState;
use keyview_app::application::inspect_key::inspect_selected;
use keyview_app::application::load_layouts::{DeviceSession, LoadOutcome};
use keyview_app::infrastructure::source::SnapshotSource;
use keyview_app::infrastructure::storage::config::{self, AppConfig, ConfigError};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect the physical layout of a keyboard from a device snapshot.
#[derive(Debug, Parser)]
#[command(
    name = "keyview",
    about = "Keyboard physical layout viewer and hit tester",
    version
)]
struct Cli {
    /// Path to a JSON device snapshot.
    snapshot: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, env = "KEYVIEW_WIDTH")]
    width: Option<f64>,

    /// Viewport height in pixels.
    #[arg(long, env = "KEYVIEW_HEIGHT")]
    height: Option<f64>,

    /// Pixels kept free around the layout on every side.
    #[arg(long, env = "KEYVIEW_PADDING")]
    padding: Option<f64>,

    /// Index of the physical layout to show.
    #[arg(long)]
    layout: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the device's physical layouts.
    Layouts,
    /// Print the layout's bounding box in key units.
    Bounds,
    /// Print the transform that fits the layout into the viewport.
    Fit,
    /// Report the topmost key under a viewport pixel.
    Hit {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Show position, rotation and binding for one key.
    Inspect { index: usize },
}

impl Cli {
    /// Applies command-line overrides on top of the config file's display section.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.display.viewport_width = width;
        }
        if let Some(height) = self.height {
            config.display.viewport_height = height;
        }
        if let Some(padding) = self.padding {
            config.display.padding = padding;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The config supplies the fallback log level, so it is read before the
    // subscriber exists and its error is reported afterwards.
    let loaded = config::load_config();
    let level = loaded
        .as_ref()
        .map(|c| c.ui.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let mut app_config = loaded.unwrap_or_else(|e| {
        warn!("could not load config, using defaults: {e}");
        AppConfig::default()
    });
    cli.apply_to(&mut app_config);

    let source = SnapshotSource::open(&cli.snapshot)
        .await
        .with_context(|| format!("failed to open snapshot {}", cli.snapshot.display()))?;

    let mut device = DeviceSession::new(app_config.display.viewport());
    let outcome = device
        .connect(&source)
        .await
        .context("failed to read device snapshot")?;
    info!(step = device.wizard().step().label(), ?outcome, "device connected");

    if outcome != LoadOutcome::Loaded {
        match device.wizard().lock_state() {
            LockState::Locked => bail!("device is locked; unlock it before reading layouts"),
            LockState::Unlocked => bail!("device data could not be read"),
        }
    }

    choose_layout(&mut device, cli.layout, &app_config)?;
    run_and_remember(&cli.command, &mut device, &mut app_config, config::save_config)
}

/// Runs `command`, then records the shown layout and device in `[ui]` and
/// saves the config whether or not the command succeeded.
fn run_and_remember(
    command: &Command,
    device: &mut DeviceSession,
    app_config: &mut AppConfig,
    save: impl FnOnce(&AppConfig) -> Result<(), ConfigError>,
) -> anyhow::Result<()> {
    let result = run_command(command, device);

    app_config.ui.selected_layout_index = Some(device.layout().selected_layout_index());
    app_config.ui.last_device = device.wizard().meta().device_name.clone();
    if let Err(e) = save(app_config) {
        warn!("could not save config: {e}");
    }
    result
}

/// Shows the layout from `--layout`, else the remembered one when it still
/// exists, else the device's active layout.
fn choose_layout(
    device: &mut DeviceSession,
    requested: Option<usize>,
    app_config: &AppConfig,
) -> anyhow::Result<()> {
    if let Some(index) = requested {
        return device
            .layout_mut()
            .select_layout(index)
            .with_context(|| format!("cannot show layout {index}"));
    }

    let same_device = app_config.ui.last_device.is_some()
        && app_config.ui.last_device == device.wizard().meta().device_name;
    if let (true, Some(index)) = (same_device, app_config.ui.selected_layout_index) {
        if let Err(e) = device.layout_mut().select_layout(index) {
            debug!("remembered layout {index} not available: {e}");
        }
    }
    Ok(())
}

fn run_command(command: &Command, device: &mut DeviceSession) -> anyhow::Result<()> {
    match *command {
        Command::Layouts => {
            let session = device.layout();
            if let Some(layouts) = session.layouts() {
                for (i, layout) in layouts.layouts.iter().enumerate() {
                    let marker = if i == session.selected_layout_index() { '*' } else { ' ' };
                    println!("{marker} {i}: {} ({} keys)", layout.name(), layout.len());
                }
            }
        }
        Command::Bounds => {
            let b = device.layout().bounds();
            println!(
                "min=({}, {}) max=({}, {}) size={}x{}",
                b.min_x,
                b.min_y,
                b.max_x,
                b.max_y,
                b.width(),
                b.height()
            );
        }
        Command::Fit => {
            let t = device.layout().transform();
            println!("scale={} offset=({}, {})", t.scale, t.offset_x, t.offset_y);
        }
        Command::Hit { x, y } => match device.layout_mut().click(x, y) {
            Some(index) => {
                println!("hit key {index}");
                print_selected(device);
            }
            None => println!("no key at ({x}, {y})"),
        },
        Command::Inspect { index } => {
            device
                .layout_mut()
                .select_key(Some(index))
                .with_context(|| format!("cannot inspect key {index}"))?;
            print_selected(device);
        }
    }
    Ok(())
}

fn print_selected(device: &DeviceSession) {
    if let Some(details) = inspect_selected(device.layout(), device.keymap()) {
        println!("{details}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
