//! Where each tracked kind keeps its audit ledger.
//!
//! Every ledger table shares the same column layout; only the table name, the
//! column pointing at the tracked record and the way a record relates to its
//! owner differ per kind.

use rib_core::enums::{EntityIdKind, EntityKind};

/// Columns common to every ledger table.
pub mod columns {
    pub const ID: &str = "id";
    pub const USER_ID: &str = "user_id";
    pub const USER_EMAIL: &str = "user_email";
    pub const ACTION: &str = "action";
    pub const CHANGED_FIELDS: &str = "changed_fields";
    pub const OLD_VALUES: &str = "old_values";
    pub const NEW_VALUES: &str = "new_values";
    pub const CREATED_AT: &str = "created_at";
}

/// How a tracked record is found from its owner's business key.
///
/// `SELECT {id_column} FROM {table} WHERE {key_column} = key` yields the
/// record ids whose ledgers belong to that owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerJoin {
    pub table: &'static str,
    pub id_column: &'static str,
    pub key_column: &'static str,
}

/// Ledger location for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditTable {
    pub log_table: &'static str,
    /// Column in `log_table` holding the tracked record's id.
    pub entity_column: &'static str,
    pub id_kind: EntityIdKind,
    pub owner: Option<OwnerJoin>,
}

const fn by_ruc(table: &'static str) -> Option<OwnerJoin> {
    Some(OwnerJoin {
        table,
        id_column: "id",
        key_column: "ruc",
    })
}

const fn by_rib(table: &'static str) -> Option<OwnerJoin> {
    Some(OwnerJoin {
        table,
        id_column: "id",
        key_column: "rib_id",
    })
}

/// Ledger descriptor for `kind`.
#[must_use]
pub const fn audit_table(kind: EntityKind) -> AuditTable {
    use EntityIdKind::{Numeric, Text};

    let (log_table, entity_column, id_kind, owner) = match kind {
        EntityKind::Rib => ("rib_audit_log", "rib_id", Numeric, by_ruc("rib")),
        EntityKind::Eeff => ("eeff_audit_log", "eeff_id", Numeric, by_ruc("eeff")),
        EntityKind::Sentinel => ("sentinel_audit_log", "sentinel_id", Text, by_ruc("sentinel")),
        EntityKind::ComportamientoCrediticio => (
            "comportamiento_crediticio_audit_log",
            "comportamiento_id",
            Numeric,
            by_ruc("comportamiento_crediticio"),
        ),
        EntityKind::ReporteTributario => (
            "reporte_tributario_audit_log",
            "reporte_tributario_id",
            Numeric,
            by_ruc("reporte_tributario"),
        ),
        EntityKind::RibEeff => (
            "rib_eeff_audit_log",
            "rib_eeff_id",
            Numeric,
            by_rib("rib_eeff"),
        ),
        EntityKind::RibReporteTributario => (
            "rib_reporte_tributario_audit_log",
            "rib_reporte_tributario_id",
            Numeric,
            by_rib("rib_reporte_tributario"),
        ),
        EntityKind::Accionista => (
            "accionista_audit_log",
            "accionista_id",
            Numeric,
            by_ruc("accionista"),
        ),
        EntityKind::Gerencia => ("gerencia_audit_log", "gerencia_id", Numeric, by_ruc("gerencia")),
        EntityKind::VentasMensuales => (
            "ventas_mensuales_audit_log",
            "ventas_mensuales_id",
            Numeric,
            by_ruc("ventas_mensuales"),
        ),
        EntityKind::ComentariosEjecutivo => (
            "comentarios_ejecutivo_audit_log",
            "comentario_id",
            Text,
            by_rib("comentarios_ejecutivo"),
        ),
    };

    AuditTable {
        log_table,
        entity_column,
        id_kind,
        owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_distinct_ledger() {
        let tables: HashSet<_> = EntityKind::ALL
            .iter()
            .map(|k| audit_table(*k).log_table)
            .collect();
        assert_eq!(tables.len(), EntityKind::ALL.len());
    }

    #[test]
    fn ledger_names_follow_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(
                audit_table(kind).log_table,
                format!("{}_audit_log", kind.as_str())
            );
        }
    }

    #[test]
    fn ruc_owned_kinds() {
        let rib = audit_table(EntityKind::Rib);
        assert_eq!(rib.id_kind, EntityIdKind::Numeric);
        assert_eq!(
            rib.owner,
            Some(OwnerJoin {
                table: "rib",
                id_column: "id",
                key_column: "ruc",
            })
        );
        assert_eq!(audit_table(EntityKind::Sentinel).id_kind, EntityIdKind::Text);
    }

    #[test]
    fn link_kinds_join_through_rib() {
        for kind in [
            EntityKind::RibEeff,
            EntityKind::RibReporteTributario,
            EntityKind::ComentariosEjecutivo,
        ] {
            let owner = audit_table(kind).owner.unwrap();
            assert_eq!(owner.key_column, "rib_id");
            assert_eq!(owner.table, kind.as_str());
        }
    }
}
