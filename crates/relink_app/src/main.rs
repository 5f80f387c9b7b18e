mod cli;
mod exit_codes;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use relink_core::ReportMode;
use relink_engine::{Reconciler, ReqwestTransport, RunReport};
use relink_logging::{relink_error, relink_info};

use crate::cli::Cli;

fn main() -> ExitCode {
    // `.env` values must be in the environment before clap reads its fallbacks.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = logging::initialize(logging::level_for(cli.verbose), cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::from(exit_codes::EXIT_SETUP);
    }

    let config = cli.reconcile_config();
    let (runtime, transport) = match setup(&cli) {
        Ok(parts) => parts,
        Err(err) => {
            relink_error!("{err:#}");
            return ExitCode::from(exit_codes::EXIT_SETUP);
        }
    };

    match runtime.block_on(Reconciler::new(&config, &transport).run()) {
        Ok(report) => {
            print_report(&report, config.report_mode);
            ExitCode::from(exit_codes::EXIT_SUCCESS)
        }
        Err(err) => {
            relink_error!("Run aborted: {err}");
            ExitCode::from(exit_codes::for_error(&err))
        }
    }
}

fn setup(cli: &Cli) -> anyhow::Result<(tokio::runtime::Runtime, ReqwestTransport)> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let transport =
        ReqwestTransport::new(cli.transport_settings()).context("failed to build HTTP client")?;
    Ok((runtime, transport))
}

fn print_report(report: &RunReport, mode: ReportMode) {
    let counts = report.counts;
    relink_info!(
        "Done: {} source, {} destination, {} matched, {} published, {} unmatched",
        counts.sources,
        counts.destinations,
        counts.matched,
        counts.published,
        counts.orphans
    );

    match mode {
        ReportMode::Apply => {
            for mapping in report.attempted() {
                println!("{mapping}");
            }
        }
        ReportMode::Audit => {
            if let Some(path) = &report.audit_path {
                println!("{}", path.display());
            }
        }
    }
}
