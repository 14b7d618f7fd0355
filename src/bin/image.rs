//! triage-image - create a raw image of a physical disk with dd.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use triage::config::DEFAULT_BLOCK_SIZE;
use triage::devices::{prompt_selection, require_disks};
use triage::imaging::{dd_command, write_image};
use triage::{logging, status, ImageOutcome, ImagingConfig};
use triage_core::Platform;
use triage_io::SystemRunner;

#[derive(Parser, Debug)]
#[command(name = "triage-image")]
#[command(version, about = "Create a disk image copy using dd", long_about = None)]
struct Args {
    /// Destination image file (e.g. ./disk.dd)
    #[arg(short, long)]
    destination: PathBuf,

    /// Block size
    #[arg(long, default_value = DEFAULT_BLOCK_SIZE)]
    bs: String,

    /// Image this device instead of choosing one interactively
    #[arg(long)]
    device: Option<String>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            status::fatal(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ImagingConfig::new(args.destination, args.bs)?;
    let platform = Platform::current()?;
    let runner = SystemRunner;

    let source = match args.device {
        Some(device) => device,
        None => {
            status::info("Scanning available disks...\n");
            let disks = require_disks(&runner, platform)?;
            prompt_selection(platform, &disks)?
        }
    };

    let command = dd_command(platform, &source, &config);
    println!();
    status::info(format!("Running: {}", command));

    match write_image(&runner, &command, &config.destination) {
        ImageOutcome::Created => {
            println!();
            status::success(format!(
                "Disk image created at: {}",
                config.destination.display()
            ));
        }
        ImageOutcome::Failed { message, partial } => {
            status::failure(format!("Error creating image: {}", message));
            if partial {
                status::warning(format!(
                    "Partial image left at {}",
                    config.destination.display()
                ));
            }
        }
    }

    Ok(())
}
