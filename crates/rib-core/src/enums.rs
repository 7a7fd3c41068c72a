//! Audit actions and tracked entity kinds.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the values stored in the remote ledger tables.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of mutation recorded in an audit ledger.
///
/// Not every entity kind emits all four actions; `status_changed` is only
/// written by kinds that carry a workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    StatusChanged,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of business record whose changes are tracked in an audit ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Rib,
    Eeff,
    Sentinel,
    ComportamientoCrediticio,
    ReporteTributario,
    RibEeff,
    RibReporteTributario,
    Accionista,
    Gerencia,
    VentasMensuales,
    ComentariosEjecutivo,
}

impl EntityKind {
    /// Every tracked kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Rib,
        Self::Eeff,
        Self::Sentinel,
        Self::ComportamientoCrediticio,
        Self::ReporteTributario,
        Self::RibEeff,
        Self::RibReporteTributario,
        Self::Accionista,
        Self::Gerencia,
        Self::VentasMensuales,
        Self::ComentariosEjecutivo,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rib => "rib",
            Self::Eeff => "eeff",
            Self::Sentinel => "sentinel",
            Self::ComportamientoCrediticio => "comportamiento_crediticio",
            Self::ReporteTributario => "reporte_tributario",
            Self::RibEeff => "rib_eeff",
            Self::RibReporteTributario => "rib_reporte_tributario",
            Self::Accionista => "accionista",
            Self::Gerencia => "gerencia",
            Self::VentasMensuales => "ventas_mensuales",
            Self::ComentariosEjecutivo => "comentarios_ejecutivo",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    /// Accepts the snake_case name, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| CoreError::Validation(format!("unknown entity kind '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// EntityIdKind
// ---------------------------------------------------------------------------

/// Column type of a tracked table's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityIdKind {
    Numeric,
    Text,
}

impl EntityIdKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for EntityIdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(action_created, AuditAction, AuditAction::Created, "created");
    test_serde_roundtrip!(
        action_status_changed,
        AuditAction,
        AuditAction::StatusChanged,
        "status_changed"
    );
    test_serde_roundtrip!(action_deleted, AuditAction, AuditAction::Deleted, "deleted");

    test_serde_roundtrip!(
        kind_comportamiento,
        EntityKind,
        EntityKind::ComportamientoCrediticio,
        "comportamiento_crediticio"
    );
    test_serde_roundtrip!(
        kind_rib_reporte_tributario,
        EntityKind,
        EntityKind::RibReporteTributario,
        "rib_reporte_tributario"
    );

    #[test]
    fn as_str_matches_serde_for_every_kind() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn kind_from_str_accepts_dashes_and_case() {
        assert_eq!(
            "Ventas-Mensuales".parse::<EntityKind>().unwrap(),
            EntityKind::VentasMensuales
        );
        assert_eq!("rib".parse::<EntityKind>().unwrap(), EntityKind::Rib);
    }

    #[test]
    fn kind_from_str_rejects_unknown() {
        let err = "ledger".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_action_fails_to_deserialize() {
        let parsed = serde_json::from_str::<AuditAction>("\"archived\"");
        assert!(parsed.is_err());
    }
}
