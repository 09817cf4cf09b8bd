use atelie::repo;
use atelie::reports;
use atelie::store::DocumentStore;
use chrono::Utc;
use clap::Subcommand;

use crate::output::{self, OutputConfig};

/// Reporting commands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Headline counters: totals by status, revenue, overdue count
    Stats,
    /// Portfolio-wide financial report
    Financial,
}

/// Executes a report command
pub fn execute(
    store: &dyn DocumentStore,
    cmd: ReportCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let students = repo::get_all_students(store)?;
    let today = Utc::now().date_naive();

    match cmd {
        ReportCommands::Stats => {
            let stats = reports::compute_stats(&students, today);
            output::print_stats(&stats, config);
        }
        ReportCommands::Financial => {
            let report = reports::compute_financial_report(&students, today);
            output::print_financial_report(&report, config);
        }
    }
    Ok(())
}
