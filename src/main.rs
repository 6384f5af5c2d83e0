use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context as _, Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rewind::backups::BackupManager;
use rewind::console::TerminalConsole;
use rewind::context::Context;
use rewind::navigator::Navigator;
use rewind::store::{SessionLock, StateDir};

#[derive(Parser)]
#[command(name = "rewind", version)]
#[command(
    about = "Step backward and forward through git history, with safety backups",
    long_about = None
)]
struct Cli {}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let _cli = Cli::parse();

    let workdir = std::env::current_dir().context("get current dir")?;
    let ctx = Context::load(&workdir)?;
    let git = ctx.git();
    git.ensure_repository()?;
    let mut console = TerminalConsole::new()?;

    let state = StateDir::open(&ctx.workdir)?;
    let _lock = SessionLock::acquire(&state.lock_path())?;
    if let Err(err) = init_logging(&state) {
        eprintln!("warning: logging disabled: {:#}", err);
    }
    tracing::info!(workdir = %ctx.workdir.display(), "session started");

    let journal = ctx.journal();
    let backups = BackupManager::new(
        &git,
        &ctx.config.backup_prefix,
        ctx.config.backup_keep_last,
    );
    let navigator = Navigator::new(&git, &journal, backups, ctx.config.recent_limit);
    navigator.run(&mut console)?;

    tracing::info!("session ended");
    Ok(())
}

/// Logs go to `.rewind/rewind.log`; the terminal belongs to the prompts.
fn init_logging(state: &StateDir) -> Result<()> {
    let path = state.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;
    let filter = EnvFilter::try_from_env("REWIND_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("install log subscriber: {}", err))
}
