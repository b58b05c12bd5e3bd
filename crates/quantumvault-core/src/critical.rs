//! Emergency cooldown capability.
//!
//! Only critical variants (dark matter, antimatter) can be cooled. The
//! operation is reached through [`QuantumObject::as_critical`], which yields
//! `None` for a data packet, so there is no way to call it on an object that
//! lacks the capability.

use crate::object::QuantumObject;
use crate::stability::Stability;

/// Stability restored by one emergency cooldown.
pub const COOLDOWN_BOOST: f64 = 50.0;

/// Objects that support emergency cooldown.
pub trait Critical {
    /// Id of the object being cooled.
    fn id(&self) -> &str;

    /// Restore [`COOLDOWN_BOOST`] stability, capped at 100. Never collapses.
    fn emergency_cooldown(&mut self) -> CooldownOutcome;
}

/// Result of an emergency cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownOutcome {
    pub id: String,
    pub stability_before: Stability,
    pub stability_after: Stability,
}

/// Mutable view of an object that has the cooldown capability.
pub struct CriticalObject<'a> {
    object: &'a mut QuantumObject,
}

impl<'a> CriticalObject<'a> {
    pub(crate) fn new(object: &'a mut QuantumObject) -> Self {
        debug_assert!(object.is_critical());
        Self { object }
    }

    pub fn object(&self) -> &QuantumObject {
        self.object
    }
}

impl Critical for CriticalObject<'_> {
    fn id(&self) -> &str {
        self.object.id()
    }

    fn emergency_cooldown(&mut self) -> CooldownOutcome {
        let before = self.object.stability();
        let after = before.increased_by(COOLDOWN_BOOST);
        self.object.replace_stability(after);
        log::debug!(
            "{} cooled: stability {} -> {}",
            self.object.id(),
            before,
            after
        );
        CooldownOutcome {
            id: self.object.id().to_string(),
            stability_before: before,
            stability_after: after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    #[test]
    fn dark_matter_cooldown_caps_at_hundred() {
        let mut o = QuantumObject::new(Variant::DarkMatter, "N0003", Some(60.0), 4).unwrap();
        let out = o.as_critical().unwrap().emergency_cooldown();
        assert_eq!(out.stability_before.value(), 60.0);
        assert_eq!(out.stability_after.value(), 100.0);
        assert_eq!(o.stability().value(), 100.0);
    }

    #[test]
    fn antimatter_cooldown_adds_fifty() {
        let mut o = QuantumObject::new(Variant::AntiMatter, "A", Some(20.0), 9).unwrap();
        o.as_critical().unwrap().emergency_cooldown();
        assert_eq!(o.stability().value(), 70.0);
    }

    #[test]
    fn cooldown_revives_collapsed_object() {
        let mut o = QuantumObject::new(Variant::AntiMatter, "A", Some(10.0), 9).unwrap();
        assert!(o.analyze().is_err());
        o.as_critical().unwrap().emergency_cooldown();
        assert_eq!(o.stability().value(), 50.0);
    }

    #[test]
    fn cooldown_never_decreases() {
        let mut o = QuantumObject::new(Variant::DarkMatter, "D", Some(100.0), 1).unwrap();
        let mut c = o.as_critical().unwrap();
        assert_eq!(c.id(), "D");
        let out = c.emergency_cooldown();
        assert!(out.stability_after >= out.stability_before);
        assert_eq!(c.object().stability().value(), 100.0);
    }
}
