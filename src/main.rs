//! zram-advisor: live effective-memory view for zRAM systems
//!
//! Shows how much uncompressed data the machine could hold once compressed
//! swap fills at the current compression ratio. Any key quits and leaves the
//! final snapshot on screen.
//!
//! Run: `zram-advisor`, or `zram-advisor --once` for a single plain report.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{debug, info};

use zram_advisor::bookmarks;
use zram_advisor::collectors::{load_context, LinuxSource};
use zram_advisor::config::Config;
use zram_advisor::error::AdvisorError;
use zram_advisor::logging;
use zram_advisor::monitor::{LoopSettings, MonitorLoop, NoInterrupt};
use zram_advisor::ui::{KeypressInterrupt, PlainRenderer, TerminalRenderer};

/// zram-advisor: effective memory with compressed swap
#[derive(Parser, Debug)]
#[command(name = "zram-advisor")]
#[command(version)]
#[command(about = "Live zRAM effective-memory advisor", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Percent of RAM compressed swap may claim in the projection
    #[arg(long, value_name = "PCT")]
    limit_pct: Option<f64>,

    /// Refresh rate in milliseconds
    #[arg(short, long, value_name = "MS")]
    refresh: Option<u64>,

    /// Print one plain report and exit
    #[arg(short, long)]
    once: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print a bookmark file of many sites for load testing, then exit
    #[arg(short = 't', long)]
    gen_test_sites: bool,
}

impl Cli {
    /// CLI > ENV > file > defaults.
    fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::from_file_layer(self.config.as_deref())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        if let Some(pct) = self.limit_pct {
            config.model.limit_pct = pct;
        }
        if let Some(ms) = self.refresh {
            config.global.update_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.gen_test_sites {
        print!("{}", bookmarks::generate(bookmarks::bundled_sites()));
        return Ok(());
    }

    let config = cli.resolve_config()?;
    logging::init_tracing(cli.debug, cli.log_file.as_deref())
        .context("failed to initialize logging")?;
    debug!(?config, "resolved configuration");

    let context = load_context(&config.paths)?;
    let source = LinuxSource::new(config.paths.clone());
    let settings = LoopSettings {
        limit_pct: config.model.limit_pct,
        tick: config.update_interval(),
        warmup: config.warmup(),
        once: cli.once,
    };

    let exit = if cli.once {
        let renderer = PlainRenderer::new(std::io::stdout());
        MonitorLoop::new(source, renderer, NoInterrupt, context, settings).run()?
    } else {
        let renderer = TerminalRenderer::new();
        MonitorLoop::new(source, renderer, KeypressInterrupt, context, settings).run()?
    };
    info!(?exit, "done");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<AdvisorError>()
                .map_or(15, AdvisorError::exit_code);
            eprintln!("Error: {e:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(15))
        }
    }
}
