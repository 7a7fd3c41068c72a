use rib_core::enums::AuditAction;
use rib_db::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_entity_id, parse_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `ribctl audit`.
pub async fn handle(
    command: &AuditCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        AuditCommands::Logs { kind, id, action } => {
            let entity_id = parse_entity_id(*kind, id)?;
            let logs = if action.is_some() || flags.limit.is_some() {
                let filter = AuditFilter {
                    entity_id: Some(entity_id),
                    action: action
                        .as_deref()
                        .map(|value| parse_enum::<AuditAction>(value, "action"))
                        .transpose()?,
                    limit: Some(effective_limit(
                        None,
                        flags.limit,
                        ctx.config.general.default_limit,
                    )),
                };
                ctx.service.query_audit(*kind, &filter).await?
            } else {
                ctx.service.logs_by_entity_id(*kind, &entity_id).await?
            };
            output(&logs, flags.format)
        }
        AuditCommands::Owner { kind, key } => {
            let mut logs = ctx.service.logs_by_owner_key(*kind, key).await?;
            if let Some(limit) = flags.limit {
                logs.truncate(usize::try_from(limit)?);
            }
            output(&logs, flags.format)
        }
        AuditCommands::Last { kind, id } => {
            let entity_id = parse_entity_id(*kind, id)?;
            let last = ctx.service.last_change(*kind, &entity_id).await;
            output(&last, flags.format)
        }
        AuditCommands::Stats { kind, id } => {
            let entity_id = parse_entity_id(*kind, id)?;
            let stats = ctx.service.change_stats(*kind, &entity_id).await;
            output(&stats, flags.format)
        }
    }
}
