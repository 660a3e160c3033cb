//! Run the headless trellis demos.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use trellis::{geom::Vec2, logging};
use trellis_demos::{bookgym, listgym, pulse};

/// CLI flags for the demo runner.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Log at debug level.
    #[clap(short, long)]
    verbose: bool,

    /// Scenario to run.
    #[clap(subcommand)]
    command: Command,
}

/// Available scenarios.
#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a tabbed book, visit every tab, tear out half and dump the tree.
    Book {
        /// Number of pages.
        #[clap(short, long, default_value_t = 6)]
        pages: usize,
    },
    /// Scroll a virtualized list to its end.
    List {
        /// Number of items.
        #[clap(short, long, default_value_t = 100)]
        items: usize,
        /// Pixels per scroll step.
        #[clap(short, long, default_value_t = 50.0)]
        step: f32,
    },
    /// Animate a bar through the frame loop.
    Pulse {
        /// Number of grow and shrink cycles.
        #[clap(short, long, default_value_t = 1)]
        cycles: u32,
        /// Timer period in milliseconds.
        #[clap(short, long, default_value_t = 16)]
        period: u32,
        /// Sleep on the system clock instead of simulating time.
        #[clap(short, long)]
        realtime: bool,
    },
}

/// Run the selected demo.
pub fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(if args.verbose { Level::DEBUG } else { Level::INFO })?;

    match args.command {
        Command::Book { pages } => {
            println!("{}", bookgym::run(pages, Vec2::new(640.0, 480.0))?);
        }
        Command::List { items, step } => {
            for line in listgym::run(items, step, Vec2::new(200.0, 120.0))? {
                println!("{line}");
            }
        }
        Command::Pulse {
            cycles,
            period,
            realtime,
        } => {
            let widths = pulse::run(cycles, period, realtime)?;
            for (frame, w) in widths.iter().enumerate() {
                println!("{frame:>4} {}", "#".repeat((*w / 4.0) as usize));
            }
        }
    }
    Ok(())
}
