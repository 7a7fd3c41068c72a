use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummaryArgs;
use crate::commands::shared::parse::parse_json_args;
use crate::context::AppContext;
use crate::output::output;

/// Handle `ribctl summary`.
pub async fn handle(
    args: &SummaryArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let params = parse_json_args(args.args.as_deref())?;
    let result = ctx.service.summary(&args.function, &params).await?;
    output(&result, flags.format)
}
