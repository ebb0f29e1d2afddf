use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use std::thread;
use std::time::Duration;
use temp_graph::core::constants::UPDATE_INTERVAL;
use temp_graph::{TempGraph, WidgetConfig};

/// temp-graph - CPU temperature history graph core
///
/// Headless runner: stands in for the panel host by driving the update cycle
/// on a fixed interval and printing each tick's reading.
#[derive(Parser, Debug)]
#[command(name = "temp-graph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sampling interval in milliseconds
    #[arg(short = 'i', long = "interval", value_name = "MS", default_value_t = UPDATE_INTERVAL.as_millis() as u64)]
    interval_ms: u64,

    /// Panel icon size in pixels (sets surface height and history depth)
    #[arg(short = 's', long = "icon-size", value_name = "PX", default_value_t = 36)]
    icon_size: u32,

    /// Number of ticks to run (0 = run until interrupted)
    #[arg(short = 'n', long = "ticks", value_name = "COUNT", default_value_t = 0)]
    ticks: u64,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override the CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting temp-graph v{}", env!("CARGO_PKG_VERSION"));

    let mut widget = TempGraph::new(WidgetConfig::default());
    if widget.registry().is_empty() {
        warn!("no thermal sensors found; readings will show the -273 sentinel");
    }
    widget.on_resize(cli.icon_size);

    let mut completed = 0u64;
    loop {
        thread::sleep(Duration::from_millis(cli.interval_ms));
        let Some(ops) = widget.on_tick() else {
            info!("update cycle stopped after {} ticks", completed);
            break;
        };
        if let Some(reading) = widget.last_reading() {
            println!(
                "{:4}° {:?} ({} draw ops)",
                reading.temperature,
                reading.level,
                ops.len()
            );
        }
        completed += 1;
        if cli.ticks != 0 && completed >= cli.ticks {
            widget.stop();
        }
    }

    Ok(())
}
