use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sortscope::pipeline::{mount, run};
use sortscope::{Config, SessionController, TerminalInput};

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate().context("invalid arguments")?;
    init_tracing_to_file(&config.log_file)?;
    info!(?config, "starting");

    let mut session = SessionController::new(config).context("create session")?;
    let mut input = TerminalInput::new();

    let mut handle = mount().context("enter fullscreen")?;
    let run_result = run(&mut handle, &mut session, &mut input);
    let restore_result = handle.unmount().context("restore terminal");

    if let Err(err) = &run_result {
        tracing::error!(%err, "application loop failed");
    }
    restore_result?;
    run_result.context("application loop")?;
    info!("exited");
    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing_to_file(log_path: &Path) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
