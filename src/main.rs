//! The CLI interface for displaymux
//!
//! Use the `--help` flag to see the available options.
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use displaymux::{
    DisplayMonitor, InputSource, MonitorSet, ScanStatus, SwitchOutcome, Vcp, query_monitors,
    send_input, switch_input,
};
use structopt::StructOpt;

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "displaymux",
    about = "Switches the input source of monitors over DDC/CI."
)]
struct Opts {
    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: SubCommands,
    /// Output debug info
    #[structopt(short, long, global = true)]
    verbose: bool,
}

/// Subcommands to select the mode of operation
#[derive(StructOpt, Debug)]
enum SubCommands {
    /// Lists all monitors with their current input, left to right
    #[structopt(alias = "ls")]
    List {
        /// Print the monitors as JSON (requires the `json` feature)
        #[structopt(long)]
        json: bool,
    },
    /// Prints the current input of a monitor
    Get {
        /// The id of the monitor, as printed by `list`
        #[structopt(short, long)]
        id: usize,
    },
    /// Switches the input of a monitor
    #[structopt(alias = "s")]
    Set {
        /// The id of the monitor, as printed by `list`
        #[structopt(short, long)]
        id: usize,
        /// The input to switch to
        #[structopt(
            short = "n",
            long,
            long_help = "The input to switch to. One of: `dp`, `dp2`, `hdmi1`, `hdmi2`, `dvi1`, `dvi2`, `vga1`, `vga2`, `usbc`, or a raw code like `0x11`."
        )]
        input: InputSource,
        /// Seconds to wait before reading the input back
        #[structopt(
            short,
            long,
            env = "DISPLAYMUX_SETTLE_SECS",
            default_value = "6"
        )]
        settle: f64,
        /// Do not read the input back after switching
        #[structopt(long)]
        no_verify: bool,
    },
}

/// Entry point for `displaymux`.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    log::info!("{}", ScanStatus::Scanning);
    let monitor_set = query_monitors()?;
    log::info!(
        "{}",
        ScanStatus::Complete {
            count: monitor_set.len()
        }
    );
    log::debug!("Discovered monitors:\n{}", monitor_set);

    run(opts.cmd, &monitor_set)
}

fn run<H: Vcp>(cmd: SubCommands, monitor_set: &MonitorSet<H>) -> Result<()> {
    match cmd {
        #[cfg(feature = "json")]
        SubCommands::List { json: true } => {
            let monitors: Vec<_> = monitor_set
                .monitors()
                .enumerate()
                .map(|(index, monitor)| displaymux::json::monitor_to_json(index, monitor))
                .collect();
            println!("{}", serde_json::to_string_pretty(&monitors)?);
        }
        #[cfg(not(feature = "json"))]
        SubCommands::List { json: true } => {
            return Err(eyre!("displaymux was built without the `json` feature"));
        }
        SubCommands::List { json: false } => {
            for (index, monitor) in monitor_set.monitors().enumerate() {
                println!(
                    "[{}] {}: {}",
                    index,
                    monitor.display_name(),
                    monitor.current_input_name()
                );
            }
        }
        SubCommands::Get { id } => {
            let monitor = get_monitor(monitor_set, id)?;
            let input = monitor.refresh_input()?;
            println!("{}", input);
        }
        SubCommands::Set {
            id,
            input,
            settle,
            no_verify,
        } => {
            let monitor = get_monitor(monitor_set, id)?;

            if no_verify {
                send_input(monitor, input)?;
                log::info!("{}: switched to {}", monitor.display_name(), input);
                return Ok(());
            }

            let settle = settle_duration(settle)?;
            let outcome = switch_input(monitor, input, settle, |status| {
                log::info!("{}", status)
            })?;

            match outcome {
                SwitchOutcome::Confirmed(actual) => {
                    println!("{}: {}", monitor.display_name(), actual);
                }
                SwitchOutcome::Reverted { requested, actual } => {
                    return Err(eyre!(
                        "{} reverted to {} instead of {}",
                        monitor.display_name(),
                        actual,
                        requested
                    ));
                }
                SwitchOutcome::Unconfirmed { requested } => {
                    println!("{}: {} (unconfirmed)", monitor.display_name(), requested);
                }
            }
        }
    }

    Ok(())
}

fn get_monitor<H: Vcp>(monitor_set: &MonitorSet<H>, id: usize) -> Result<&DisplayMonitor<H>> {
    monitor_set
        .get(id)
        .ok_or_else(|| eyre!("Monitor with id {} not found", id))
}

fn settle_duration(secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(secs)
        .map_err(|e| eyre!("Invalid settle time {} seconds: {}", secs, e))
}
