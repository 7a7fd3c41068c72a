use clap::{Args, Subcommand};

use crate::cli::subcommands::AuditCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Change history of tracked records.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Reconcile a taxpayer's balance sheets across fiscal years.
    Reconcile(ReconcileArgs),
    /// Declared sales totals per year for a taxpayer.
    Sales(SalesArgs),
    /// Call a server-side summary procedure.
    Summary(SummaryArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ReconcileArgs {
    /// Taxpayer RUC
    pub ruc: String,

    /// Fiscal year to include (repeatable; defaults to the configured years)
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,
}

#[derive(Clone, Debug, Args)]
pub struct SalesArgs {
    /// Taxpayer RUC
    pub ruc: String,

    /// Print every declared month instead of yearly totals
    #[arg(long)]
    pub monthly: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SummaryArgs {
    /// Procedure name
    pub function: String,

    /// Procedure arguments as a JSON object
    #[arg(long)]
    pub args: Option<String>,
}
