//! Quantum objects: validated identity, stability, and danger level.
//!
//! A [`QuantumObject`] is only ever mutated through [`QuantumObject::analyze`],
//! the validated setters, and the cooldown capability in [`crate::critical`].
//! Collapse is a logical state (stability 0), never a removal.

use std::fmt;

use crate::critical::CriticalObject;
use crate::error::{CollapseEvent, InvalidValue};
use crate::report::StatusReport;
use crate::stability::Stability;
use crate::variant::Variant;

/// Non-empty object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidValue> {
        let id = id.into();
        if id.is_empty() {
            return Err(InvalidValue::EmptyId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Danger level in `[1, 10]`. Informational; no effect on decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DangerLevel(u8);

impl DangerLevel {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn new(level: i64) -> Result<Self, InvalidValue> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(InvalidValue::DangerOutOfRange(level));
        }
        Ok(Self(level as u8))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub id: String,
    pub message: &'static str,
    pub stability_before: Stability,
    pub stability_after: Stability,
}

/// An object in the vault.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumObject {
    id: ObjectId,
    stability: Stability,
    danger: DangerLevel,
    variant: Variant,
}

impl QuantumObject {
    /// Build an object, validating every field.
    ///
    /// Fails when `id` is empty, `stability` is absent (or NaN), or `danger`
    /// is outside `[1, 10]`. A present stability is clamped, never rejected.
    pub fn new(
        variant: Variant,
        id: impl Into<String>,
        stability: Option<f64>,
        danger: i64,
    ) -> Result<Self, InvalidValue> {
        let id = ObjectId::new(id)?;
        let stability = Stability::from_option(stability)?;
        let danger = DangerLevel::new(danger)?;
        Ok(Self {
            id,
            stability,
            danger,
            variant,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn stability(&self) -> Stability {
        self.stability
    }

    pub fn danger(&self) -> DangerLevel {
        self.danger
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether this object exposes emergency cooldown.
    pub fn is_critical(&self) -> bool {
        self.variant.supports_cooldown()
    }

    /// Validated stability update. On error the old value is kept.
    pub fn set_stability(&mut self, value: Option<f64>) -> Result<(), InvalidValue> {
        self.stability = Stability::from_option(value)?;
        Ok(())
    }

    /// Validated danger update. On error the old value is kept.
    pub fn set_danger(&mut self, level: i64) -> Result<(), InvalidValue> {
        self.danger = DangerLevel::new(level)?;
        Ok(())
    }

    pub(crate) fn replace_stability(&mut self, stability: Stability) {
        self.stability = stability;
    }

    /// Analyze the object: lose the variant's decay, then check for collapse.
    ///
    /// On collapse the object stays at stability 0 and the event carries its id.
    pub fn analyze(&mut self) -> Result<AnalysisOutcome, CollapseEvent> {
        let before = self.stability;
        let after = before.decreased_by(self.variant.decay());
        self.stability = after;
        log::debug!("{} analyzed: stability {} -> {}", self.id, before, after);

        if after.is_depleted() {
            log::error!("{} collapsed during analysis", self.id);
            return Err(CollapseEvent::new(self.id.as_str()));
        }

        Ok(AnalysisOutcome {
            id: self.id.to_string(),
            message: self.variant.analysis_message(),
            stability_before: before,
            stability_after: after,
        })
    }

    /// One-line snapshot: id, stability (one decimal), danger, variant.
    pub fn status_report(&self) -> String {
        self.snapshot().to_string()
    }

    /// Structured snapshot of the same data.
    pub fn snapshot(&self) -> StatusReport {
        StatusReport::of(self)
    }

    /// Cooldown capability, present only for critical variants.
    pub fn as_critical(&mut self) -> Option<CriticalObject<'_>> {
        if self.is_critical() {
            Some(CriticalObject::new(self))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(variant: Variant, stability: f64) -> QuantumObject {
        QuantumObject::new(variant, "T0001", Some(stability), 5).unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn constructor_clamps_stability() {
        assert_eq!(obj(Variant::DataPacket, 250.0).stability().value(), 100.0);
        assert_eq!(obj(Variant::DataPacket, -10.0).stability().value(), 0.0);
    }

    #[test]
    fn constructor_rejects_empty_id() {
        let err = QuantumObject::new(Variant::DarkMatter, "", Some(50.0), 3).unwrap_err();
        assert_eq!(err, InvalidValue::EmptyId);
    }

    #[test]
    fn constructor_rejects_missing_stability() {
        let err = QuantumObject::new(Variant::DarkMatter, "X", None, 3).unwrap_err();
        assert_eq!(err, InvalidValue::MissingStability);
    }

    #[test]
    fn constructor_rejects_danger_out_of_range() {
        for bad in [0, 11, -1, 100] {
            let err = QuantumObject::new(Variant::AntiMatter, "X", Some(50.0), bad).unwrap_err();
            assert_eq!(err, InvalidValue::DangerOutOfRange(bad));
        }
        for good in 1..=10 {
            assert!(
                QuantumObject::new(Variant::AntiMatter, "X", Some(50.0), good).is_ok()
            );
        }
    }

    #[test]
    fn rejected_update_keeps_old_value() {
        let mut o = obj(Variant::DataPacket, 40.0);
        assert!(o.set_danger(42).is_err());
        assert_eq!(o.danger().value(), 5);
        assert!(o.set_stability(None).is_err());
        assert_eq!(o.stability().value(), 40.0);
        o.set_stability(Some(120.0)).unwrap();
        assert_eq!(o.stability().value(), 100.0);
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    #[test]
    fn data_packet_analysis() {
        let mut o = obj(Variant::DataPacket, 100.0);
        let out = o.analyze().unwrap();
        assert_eq!(o.stability().value(), 95.0);
        assert_eq!(out.message, "data content read");
        assert_eq!(out.stability_before.value(), 100.0);
        assert_eq!(out.stability_after.value(), 95.0);
    }

    #[test]
    fn data_packet_collapses_at_five() {
        let mut o = obj(Variant::DataPacket, 5.0);
        let err = o.analyze().unwrap_err();
        assert_eq!(err.id, "T0001");
        assert_eq!(o.stability().value(), 0.0);
    }

    #[test]
    fn data_packet_survives_just_above_five() {
        let mut o = obj(Variant::DataPacket, 5.5);
        assert!(o.analyze().is_ok());
        assert!((o.stability().value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn dark_and_anti_decay() {
        let mut dark = obj(Variant::DarkMatter, 80.0);
        dark.analyze().unwrap();
        assert_eq!(dark.stability().value(), 65.0);

        let mut anti = obj(Variant::AntiMatter, 80.0);
        anti.analyze().unwrap();
        assert_eq!(anti.stability().value(), 55.0);
    }

    #[test]
    fn collapsed_object_collapses_again() {
        let mut o = obj(Variant::DarkMatter, 10.0);
        assert!(o.analyze().is_err());
        assert!(o.analyze().is_err());
        assert_eq!(o.stability().value(), 0.0);
    }

    // -----------------------------------------------------------------------
    // Reports and capability
    // -----------------------------------------------------------------------

    #[test]
    fn status_report_format() {
        let o = QuantumObject::new(Variant::AntiMatter, "N0042", Some(77.77), 9).unwrap();
        assert_eq!(
            o.status_report(),
            "ID: N0042, Stability: 77.8, Danger: 9, Type: AntiMatter"
        );
    }

    #[test]
    fn status_report_is_idempotent() {
        let o = obj(Variant::DarkMatter, 61.0);
        assert_eq!(o.status_report(), o.status_report());
    }

    #[test]
    fn data_packet_has_no_cooldown_capability() {
        let mut o = obj(Variant::DataPacket, 50.0);
        assert!(!o.is_critical());
        assert!(o.as_critical().is_none());
    }

    #[test]
    fn object_id_rejects_empty() {
        assert_eq!(ObjectId::new(""), Err(InvalidValue::EmptyId));
        let id = ObjectId::new("N0001").unwrap();
        assert_eq!(id.as_str(), "N0001");
    }
}
