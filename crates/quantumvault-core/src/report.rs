//! Structured status snapshots and inventory summaries.

use serde::Serialize;

use crate::object::QuantumObject;
use crate::variant::Variant;

/// Point-in-time view of one object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub id: String,
    /// Stability in `[0, 100]`.
    pub stability: f64,
    pub danger: u8,
    pub variant: Variant,
    /// Whether the object supports emergency cooldown.
    pub critical: bool,
    /// Ten-cell stability gauge.
    pub gauge: String,
}

impl StatusReport {
    pub fn of(object: &QuantumObject) -> Self {
        Self {
            id: object.id().to_string(),
            stability: object.stability().value(),
            danger: object.danger().value(),
            variant: object.variant(),
            critical: object.is_critical(),
            gauge: object.stability().gauge(),
        }
    }
}

impl std::fmt::Display for StatusReport {
    /// `ID: <id>, Stability: <x.y>, Danger: <n>, Type: <variant>`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Stability: {:.1}, Danger: {}, Type: {}",
            self.id, self.stability, self.danger, self.variant
        )
    }
}

/// Counts shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InventorySummary {
    /// Objects in the inventory, collapsed ones included.
    pub total: usize,
    /// Objects that support emergency cooldown.
    pub critical: usize,
}

impl std::fmt::Display for InventorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "System active | Inventory: {} objects | Critical: {}",
            self.total, self.critical
        )
    }
}
