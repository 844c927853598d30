use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, info};

use vga_sync::host::args::{Mode, TimingArgs};
use vga_sync::host::logging::{setup_logging_file, setup_logging_stdio};
use vga_sync::host::screen::headless;
use vga_sync::{Bench, FrameReport, VideoMode};

/// VGA sync generator model
/// Clocks a model of the 640x480 sync generator and reports its outputs
#[derive(Parser)]
#[command(name = "vga-sync")]
#[command(about = "A cycle-exact model of a VGA sync generator")]
struct Args {
    /// Video mode to start from
    #[arg(long, value_enum, default_value_t)]
    mode: Mode,

    #[command(flatten)]
    timing: TimingArgs,

    /// Write logs to this file instead of the console
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the timing constants
    Constants,

    /// Clock one frame from reset and measure the outputs
    Report,

    /// Print the outputs clock by clock
    Trace {
        /// Number of clocks to print
        #[arg(long, default_value_t = 16)]
        ticks: u64,

        /// Clocks to run silently before printing
        #[arg(long, default_value_t = 0)]
        skip: u64,

        /// Clocks (counted from the end of the initial reset) on which reset
        /// is asserted, repeatable
        #[arg(long)]
        reset_at: Vec<u64>,
    },

    /// Draw the frame as a map of sync and blanking regions
    #[cfg(feature = "tui")]
    Diagram {
        #[arg(long, default_value_t = 80)]
        width: u16,

        #[arg(long, default_value_t = 30)]
        height: u16,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };
    if let Some(logfile) = &args.log_file {
        setup_logging_file(level, logfile)?;
    } else {
        setup_logging_stdio(level);
    }

    let base = args.mode.video_mode();
    let mode = VideoMode {
        timing: args.timing.resolve(base.timing)?,
        ..base
    };
    info!(
        "Mode {}: {}x{} clocks, {:.3} Hz refresh, {:.3} kHz line rate",
        mode.name,
        mode.timing.htot(),
        mode.timing.vtot(),
        mode.refresh_hz(),
        mode.line_rate_hz() / 1000.0
    );

    match args.command {
        Command::Constants => {
            for line in mode.timing.constants().to_string().lines() {
                info!("{line}");
            }
        }
        Command::Report => {
            let report = FrameReport::measure(mode.timing)?;
            for line in report.to_string().lines() {
                info!("{line}");
            }
        }
        Command::Trace {
            ticks,
            skip,
            reset_at,
        } => {
            let mut bench = Bench::new(mode.timing)?;
            bench.reset(1);
            let frames = headless::run(&mut bench, skip, ticks, &reset_at, |edge, state| {
                info!(
                    "{:8} {} pins: hsync={} vsync={}",
                    edge,
                    state,
                    mode.hsync_level(state) as u8,
                    mode.vsync_level(state) as u8
                );
            });
            info!("{} clocks, {} frame(s) completed", bench.cycles(), frames);
        }
        #[cfg(feature = "tui")]
        Command::Diagram { width, height } => {
            use vga_sync::host::screen::ratatui::raster_text;
            for line in raster_text(mode.timing, width, height) {
                info!("{line}");
            }
        }
    }
    Ok(())
}
