use crate::cli::GlobalFlags;
use crate::cli::root_commands::SalesArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ribctl sales`.
pub async fn handle(args: &SalesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.monthly {
        let monthly = ctx.service.monthly_sales(&args.ruc).await?;
        return output(&monthly, flags.format);
    }
    let yearly = ctx.service.sales_by_year(&args.ruc).await?;
    output(&yearly, flags.format)
}
