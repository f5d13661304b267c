//! Glint - run a Rhai game script in a window
//!
//! Usage:
//!   glint <script.rhai> [--config <glint.toml>] [--log-level <filter>]

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{GlintConfig, DEFAULT_CONFIG_FILE};
use glint_player::PlayerApp;
use glint_script::ScriptSystem;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Glint - run a Rhai game script with keyboard and mouse input")]
struct Args {
    /// Path to the script to run
    script: PathBuf,

    /// Path to a config file (defaults to ./glint.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "glint_script=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config_path, explicit) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let config = GlintConfig::load(&config_path, explicit)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let level = args.log_level.as_deref().unwrap_or(&config.log.level);
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();

    // Evaluate the top level; the script registers its callbacks via run()
    let mut scripts = ScriptSystem::new(config.window.clone());
    scripts
        .load_file(&args.script)
        .with_context(|| format!("Failed to run script {}", args.script.display()))?;

    let Some(run_config) = scripts.run_config() else {
        log::info!("{} did not call run(); exiting", args.script.display());
        return Ok(());
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(scripts, run_config, config.window.vsync);
    event_loop.run_app(&mut app)?;

    app.finish().context("Script run failed")?;
    Ok(())
}
