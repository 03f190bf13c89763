mod app;
mod input;
mod render;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use solsim::config::{
    default_settings_path, load_bodies, load_settings, save_settings_atomic, Settings,
};
use solsim::Session;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solsim")]
#[command(about = "Planets and asteroid 2024 YR4 on simplified Keplerian orbits, in the terminal")]
struct Cli {
    /// Settings file (JSON). Defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Body table (JSON array) replacing the built-in solar system
    #[arg(long)]
    bodies: Option<PathBuf>,

    /// Orbit samples per year of period
    #[arg(long)]
    steps_per_year: Option<u32>,

    /// Milliseconds between animation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Monochrome output
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Hide the starfield backdrop
    #[arg(long, default_value_t = false)]
    no_stars: bool,

    /// Write logs here (level from RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective settings to the config file and exit
    #[arg(long, default_value_t = false)]
    write_default_config: bool,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<(Settings, PathBuf)> {
    let path = match &cli.config {
        Some(p) => p.clone(),
        None => default_settings_path()?,
    };
    let mut settings = load_settings(&path)?;

    if let Some(steps) = cli.steps_per_year {
        settings.steps_per_year = steps;
        settings.frames_per_cycle = steps as u64 * 10;
    }
    if let Some(ms) = cli.tick_ms {
        settings.tick_ms = ms;
    }
    if cli.no_color {
        settings.enable_color = false;
    }
    if cli.no_stars {
        settings.show_stars = false;
    }
    if let Some(p) = &cli.bodies {
        settings.bodies = Some(load_bodies(p)?);
    }

    ensure!(settings.tick_ms > 0, "invalid configuration: tick_ms must be > 0");
    ensure!(
        settings.frames_per_cycle > 0,
        "invalid configuration: frames_per_cycle must be > 0"
    );
    Ok((settings, path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let (settings, path) = resolve_settings(&cli)?;
    if cli.write_default_config {
        save_settings_atomic(&path, &settings)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    info!(
        "starting: {} steps/yr, {} ms/tick, cycle {} frames",
        settings.steps_per_year, settings.tick_ms, settings.frames_per_cycle
    );
    let session = Session::new(settings.body_table(), settings.session_options())?;
    app::run(settings, session)
}
