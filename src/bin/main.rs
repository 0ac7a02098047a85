use anyhow::{Context, Result};
use clap::Parser;
use oxtile::logging::{self, LogLevel};
use oxtile::window_manager::{Exit, WindowManager};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, name = "oxtile", about = "A dynamic tiling window manager for X11")]
struct Cli {
    /// Path to a custom config file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Write the default config and exit.
    #[arg(long)]
    init: bool,

    /// Parse the config and exit without touching the display.
    #[arg(long)]
    check: bool,

    /// Log level: none, errors, warnings, info, debug or trace.
    #[arg(long, short, default_value = "info")]
    log_level: String,

    /// Shorthand for `--log-level debug`.
    #[arg(long, short = 'D')]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        LogLevel::Debug
    } else {
        LogLevel::from(cli.log_level.as_str())
    };
    logging::init(level)?;

    if cli.init {
        let path = oxtile::config::write_template(cli.config.as_deref())
            .context("Failed to write the default config")?;
        println!("Config created at {}", path.display());
        return Ok(());
    }

    let config = oxtile::config::load_config(cli.config.as_deref())
        .context("Failed to load config")?;

    if cli.check {
        println!(
            "Config OK: {} tags, {} keybindings",
            config.tags.len(),
            config.keybindings.len()
        );
        return Ok(());
    }

    let mut wm = WindowManager::new(config).context("Failed to start the window manager")?;
    let exit = wm.run()?;

    drop(wm);

    if exit == Exit::Restart {
        use std::os::unix::process::CommandExt;
        let args: Vec<String> = std::env::args().collect();
        let err = std::process::Command::new(&args[0]).args(&args[1..]).exec();
        eprintln!("Failed to restart: {}", err);
        std::process::exit(1);
    }

    Ok(())
}
