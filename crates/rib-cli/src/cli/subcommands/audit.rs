use clap::Subcommand;
use rib_core::enums::EntityKind;

/// Audit ledger commands.
///
/// `KIND` is one of: rib, eeff, sentinel, comportamiento-crediticio,
/// reporte-tributario, rib-eeff, rib-reporte-tributario, accionista,
/// gerencia, ventas-mensuales, comentarios-ejecutivo.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Change history of one record, newest first.
    Logs {
        kind: EntityKind,
        id: String,
        /// Only entries with this action (created, updated, status_changed, deleted)
        #[arg(long)]
        action: Option<String>,
    },
    /// Change history of every record owned by a RUC (or RIB id for RIB-linked kinds).
    Owner { kind: EntityKind, key: String },
    /// Most recent change of one record.
    Last { kind: EntityKind, id: String },
    /// Change statistics of one record.
    Stats { kind: EntityKind, id: String },
}
