//! CLI entry point for piper-gtk
//!
//! Provides command-line interface for listing devices,
//! managing the settings file, and launching the GUI.

use clap::{Parser, Subcommand};
use colored::*;
use piper_gtk::config::{self, Settings, DEFAULT_SETTINGS_PATH};
use piper_gtk::core::DeviceSelection;
use piper_gtk::ratbag::{self, ClientMode};
use piper_gtk::ui::{App, ControllerOptions};
use std::path::Path;

#[derive(Parser)]
#[command(name = "piper-gtk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the configuration window (default)
    Gui {
        /// Use the built-in demo device instead of ratbagd
        #[arg(long)]
        dry_run: bool,

        /// Device to configure when several are connected (name or id)
        #[arg(short, long)]
        device: Option<String>,
    },

    /// List devices and their active profile
    List {
        /// Use the built-in demo device instead of ratbagd
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a settings file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the settings file path
    Path,
}

fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let cli = Cli::parse();
    let settings_path = config::expand_path(&cli.config)?;

    match cli.command.unwrap_or(Commands::Gui {
        dry_run: false,
        device: None,
    }) {
        Commands::Gui { dry_run, device } => {
            let settings = Settings::load(&settings_path)?;
            run_gui(&settings, dry_run, device)?
        }
        Commands::List { dry_run } => {
            let settings = Settings::load(&settings_path)?;
            list_devices(dry_run || settings.dry_run)?
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => init_settings(&settings_path, force)?,
            ConfigAction::Path => println!("{}", settings_path.display()),
        },
    }

    Ok(())
}

fn client_mode(dry_run: bool) -> ClientMode {
    if dry_run {
        ClientMode::DryRun
    } else {
        ClientMode::Live
    }
}

/// Launch the GUI; command-line flags override settings
///
/// An unreachable ratbagd still opens the window, showing the reason.
fn run_gui(settings: &Settings, dry_run: bool, device: Option<String>) -> anyhow::Result<()> {
    let service = ratbag::connect_or_unavailable(client_mode(dry_run || settings.dry_run));

    let options = ControllerOptions {
        preferred_device: device.or_else(|| settings.device.clone()),
        single_expansion: settings.single_expansion,
    };

    App::new(service, options).run();
    Ok(())
}

/// List devices with their active profile
fn list_devices(dry_run: bool) -> anyhow::Result<()> {
    let service = ratbag::connect(client_mode(dry_run))?;
    let devices = service.list_devices()?;

    if devices.is_empty() {
        println!("{} {}", "✗".red().bold(), piper_gtk::core::selection::NO_DEVICE_MESSAGE);
        return Ok(());
    }

    let total = devices.len();
    for device in &devices {
        println!("{} {}", device.name.cyan().bold(), format!("({})", device.id).dimmed());

        let Some(profile) = device.active_profile() else {
            println!("  {}", "no profiles".yellow());
            continue;
        };

        println!("  {} {}", "Active profile:".bold(), profile.index);
        for resolution in &profile.resolutions {
            let (x, y) = (resolution.resolution_x.get(), resolution.resolution_y.get());
            let rate = if resolution.separate_xy() && x != y {
                format!("{}x{} DPI", x, y)
            } else {
                format!("{} DPI", x)
            };
            println!(
                "  {} {} {}",
                format!("Resolution {}", resolution.index + 1).green(),
                rate,
                format!("[{}-{}]", resolution.min_res, resolution.max_res).dimmed(),
            );
        }
        for button in &profile.buttons {
            println!(
                "  {} → {}",
                format!("Button {}", button.index).magenta(),
                button.button_mapping.get()
            );
        }
        for led in &profile.leds {
            println!("  {} → {}", format!("LED {}", led.index).blue(), led.mode.get());
        }
        println!();
    }

    if let DeviceSelection::Multiple { chosen, ignored } = DeviceSelection::select(devices, None) {
        println!(
            "{} The GUI configures {} by default; ignoring {}",
            "⚠".yellow(),
            chosen.name.bold(),
            ignored.join(", ")
        );
    }

    println!("{} Total: {} device{}", "✓".green(), total, if total == 1 { "" } else { "s" });
    Ok(())
}

/// Write a default settings file
fn init_settings(path: &Path, force: bool) -> anyhow::Result<()> {
    Settings::default().save(path, force)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
