//! css-watch CLI - recompile a stylesheet bundle on change
//!
//! Usage: css-watch [OPTIONS] <INPUT> <OUTPUT>

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use css_watch::watcher::{self, Trigger};
use css_watch::{pipeline, Reporter, WatchConfig};

/// Recompiles a CSS bundle whenever the entry stylesheet or any sibling
/// stylesheet under its directory changes.
#[derive(Parser, Debug)]
#[command(name = "css-watch")]
#[command(version, about, long_about = None)]
#[command(after_help = "Examples:
  css-watch ./src/index.css ./css/index.css
  css-watch -s -c index.css ../css/index.css")]
struct Cli {
    /// Stylesheet entry point to watch
    input: PathBuf,

    /// CSS file to write
    output: PathBuf,

    /// Write a source map sidecar next to the output
    #[arg(short = 's', long)]
    source_map: bool,

    /// Run one rebuild immediately at startup
    #[arg(short = 'c', long)]
    compile: bool,

    /// Minify the output CSS
    #[arg(short = 'm', long)]
    minify: bool,

    /// Emit NDJSON events instead of human-readable lines
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = WatchConfig::new(
        cli.input,
        cli.output,
        cli.source_map,
        cli.compile,
        cli.minify,
    )?;
    run(&config, cli.json)
}

fn run(config: &WatchConfig, json: bool) -> Result<()> {
    let reporter = Reporter::new(json);

    // Watcher first: an inaccessible root is fatal before anything runs.
    let (_handle, events) = watcher::start(config)?;

    let running = Arc::new(AtomicBool::new(true));
    let running_flag = running.clone();
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    reporter.startup(config);

    if config.compile_on_run {
        run_rebuild(config, Trigger::Startup, &reporter);
    }

    while running.load(Ordering::SeqCst) {
        match events.recv_timeout(Duration::from_millis(50)) {
            Ok(event) => run_rebuild(config, Trigger::Change(event), &reporter),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    reporter.shutdown();
    Ok(())
}

/// One rebuild with its before/after report lines. Errors are reported and
/// confined to this rebuild; the watch loop keeps running.
fn run_rebuild(config: &WatchConfig, trigger: Trigger, reporter: &Reporter) {
    reporter.rebuild_started(config, &trigger);
    match pipeline::rebuild(config) {
        Ok(_) => reporter.done(),
        Err(err) => reporter.error(&err),
    }
}
