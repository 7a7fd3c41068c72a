use crate::cli::root_commands::ReconcileArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ribctl reconcile`.
pub async fn handle(
    args: &ReconcileArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let result = if args.years.is_empty() {
        ctx.service.reconcile(&args.ruc).await
    } else {
        ctx.service.reconcile_years(&args.ruc, &args.years).await
    };

    if flags.format != OutputFormat::Table {
        return output(&result, flags.format);
    }

    // Tables show one row per year; the header and warnings go to stderr.
    if !flags.quiet {
        eprintln!(
            "{} ({})",
            result.taxpayer_name.as_deref().unwrap_or("unknown taxpayer"),
            result.taxpayer_id
        );
        for warning in result.all_warnings() {
            eprintln!("warning: {warning}");
        }
    }
    output(&result.years, flags.format)
}
