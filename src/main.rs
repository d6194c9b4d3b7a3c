//! memfs - In-Memory Filesystem Simulator
//!
//! Runs filesystem commands either from the command line or from an
//! interactive prompt.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memfs::config::MemFsConfig;
use memfs::error::Result;
use memfs::fs::FileSystem;
use memfs::shell::Shell;

/// Start up the in-memory filesystem.
#[derive(Parser)]
#[command(name = "memfs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run in interactive mode: specifying the commands one at a time
    #[arg(long)]
    interactive: bool,

    /// Execute a series of predetermined commands instead, e.g.
    /// --commands 'command 1' 'command 2'
    #[arg(long, num_args = 1..)]
    commands: Vec<String>,

    /// Capacity of the virtual hard disk in bytes (overrides the config file)
    #[arg(long)]
    hard_disk_capacity: Option<usize>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    if let Err(e) = run(cli, &config) {
        error!("Session aborted: {}", e);
        println!("{}", e);
        std::process::exit(1);
    }
}

/// Load the config file if given, then apply command line overrides
fn load_config(cli: &Cli) -> Result<MemFsConfig> {
    let mut config = match &cli.config {
        Some(path) => MemFsConfig::from_file(path)?,
        None => MemFsConfig::default(),
    };

    if let Some(capacity) = cli.hard_disk_capacity {
        config = config.with_capacity(capacity);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Initialize logging. Logs go to stderr so command output stays clean.
fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli, config: &MemFsConfig) -> Result<()> {
    let mut shell = Shell::new(FileSystem::from_config(config));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.commands.is_empty() {
        info!("Running {} command(s)", cli.commands.len());
        shell.run_batch(&cli.commands, &mut out)
    } else if cli.interactive {
        shell.run_interactive(io::stdin().lock(), &mut out)
    } else {
        writeln!(out, "Must supply --interactive or --commands 'command1' ...")?;
        Ok(())
    }
}
