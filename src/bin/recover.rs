//! triage-recover - recover deleted files from a disk image and report on
//! them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use triage::config::{DEFAULT_RECOVERY_DIR, DEFAULT_REPORT_FILE};
use triage::recovery::{locate_offset, scan_deleted};
use triage::report::generate_report;
use triage::summary::RunSummary;
use triage::{logging, status, RecoveryConfig, ToolPaths};
use triage_core::partition::DEFAULT_PARTITION_LABEL;
use triage_io::SystemRunner;

#[derive(Parser, Debug)]
#[command(name = "triage-recover")]
#[command(version, about = "Deleted file recovery and metadata analysis", long_about = None)]
struct Args {
    /// Path to disk image
    #[arg(long)]
    image: PathBuf,

    /// Directory recovered files are written to
    #[arg(long, default_value = DEFAULT_RECOVERY_DIR)]
    output_dir: PathBuf,

    /// CSV report path; overwritten on each run
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    report: PathBuf,

    /// Partition description to recover from, as printed by mmls
    #[arg(long, default_value = DEFAULT_PARTITION_LABEL)]
    label: String,

    /// Directory containing mmls, fls and icat
    #[arg(long)]
    tool_dir: Option<PathBuf>,

    /// Also write a JSON run summary to this path
    #[arg(long)]
    summary: Option<PathBuf>,

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
    let tools = args
        .tool_dir
        .as_deref()
        .map(ToolPaths::in_dir)
        .unwrap_or_default();

    let config = RecoveryConfig::new(args.image)
        .with_output_dir(args.output_dir)
        .with_report_path(args.report)
        .with_partition_label(args.label)?
        .with_tools(tools)
        .with_summary_path(args.summary);

    let runner = SystemRunner;

    status::info("Determining partition offset...");
    let offset = locate_offset(&runner, &config);

    status::info("Scanning for deleted files...");
    let entries = scan_deleted(&runner, &config, offset);

    status::info(format!(
        "Found {} deleted files. Recovering...",
        entries.len()
    ));
    let report = generate_report(&runner, &config, offset, &entries)?;

    if report.anomalous > 0 {
        status::warning(format!(
            "{} of {} files flagged with anomalies",
            report.anomalous, report.rows
        ));
    }
    status::success(format!(
        "Report saved to {}",
        config.report_path.display()
    ));

    if let Some(path) = &config.summary_path {
        RunSummary::new(&config, offset, &report).write(path)?;
        status::info(format!("Summary saved to {}", path.display()));
    }

    Ok(())
}
