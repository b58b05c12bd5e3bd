//! Driver session: the inventory, the id counter, and the random source.
//!
//! Console and panel drivers both talk to a [`Vault`]. It dispatches by id,
//! gates cooldown on capability, and passes collapse straight through to the
//! caller. What happens after a collapse (exit, modal, keep going) is up to
//! the driver.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::critical::{CooldownOutcome, Critical};
use crate::error::VaultError;
use crate::factory::ObjectFactory;
use crate::inventory::{Inventory, Listing};
use crate::object::{AnalysisOutcome, QuantumObject};
use crate::report::{InventorySummary, StatusReport};

/// Stability below which an analysis raises a low-stability warning.
pub const DEFAULT_WARN_BELOW: f64 = 30.0;

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaultConfig {
    /// Counter used for the first generated id.
    pub start_counter: u32,
    /// Low-stability warning threshold.
    pub warn_below: f64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            start_counter: 1,
            warn_below: DEFAULT_WARN_BELOW,
        }
    }
}

/// Successful analysis as seen by a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeReport {
    pub outcome: AnalysisOutcome,
    /// Object state after the analysis.
    pub object: StatusReport,
    /// Post-analysis stability fell below the warning threshold.
    pub low_stability: bool,
}

/// Successful cooldown as seen by a driver.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownReport {
    pub outcome: CooldownOutcome,
    /// Object state after the cooldown.
    pub object: StatusReport,
}

/// Single-actor session over an in-memory inventory.
pub struct Vault<R: Rng = StdRng> {
    inventory: Inventory,
    factory: ObjectFactory,
    rng: R,
    config: VaultConfig,
}

impl Vault<StdRng> {
    /// Deterministic session.
    pub fn seeded(seed: u64, config: VaultConfig) -> Self {
        Self::with_config(StdRng::seed_from_u64(seed), config)
    }

    /// Session seeded from the thread-local generator.
    pub fn from_entropy(config: VaultConfig) -> Self {
        Self::with_config(StdRng::from_rng(&mut rand::rng()), config)
    }
}

impl<R: Rng> Vault<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, VaultConfig::default())
    }

    pub fn with_config(rng: R, config: VaultConfig) -> Self {
        Self {
            inventory: Inventory::new(),
            factory: ObjectFactory::starting_at(config.start_counter),
            rng,
            config,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Spawn a random object with the next id and store it.
    pub fn add_random(&mut self) -> Result<&QuantumObject, VaultError> {
        let object = self.factory.spawn(&mut self.rng)?;
        log::info!("spawned {}", object.status_report());
        Ok(self.inventory.add(object))
    }

    /// Store an explicitly built object.
    pub fn add(&mut self, object: QuantumObject) -> &QuantumObject {
        log::info!("added {}", object.status_report());
        self.inventory.add(object)
    }

    pub fn find(&self, id: &str) -> Option<&QuantumObject> {
        self.inventory.find(id)
    }

    pub fn list(&self) -> Listing<'_> {
        self.inventory.list_all()
    }

    pub fn summary(&self) -> InventorySummary {
        self.inventory.summary()
    }

    /// Analyze the object with this id.
    ///
    /// A collapse comes back as [`VaultError::Collapse`]; the object stays in
    /// the inventory at stability 0.
    pub fn analyze(&mut self, id: &str) -> Result<AnalyzeReport, VaultError> {
        let warn_below = self.config.warn_below;
        let object = self.lookup_mut(id)?;
        let outcome = object.analyze()?;
        let low_stability = outcome.stability_after.value() < warn_below;
        if low_stability {
            log::warn!(
                "{} at critical level: stability {}",
                outcome.id,
                outcome.stability_after
            );
        }
        Ok(AnalyzeReport {
            outcome,
            object: object.snapshot(),
            low_stability,
        })
    }

    /// Apply emergency cooldown to the object with this id.
    ///
    /// Objects without the capability are rejected with
    /// [`VaultError::NotCritical`] and left untouched.
    pub fn emergency_cooldown(&mut self, id: &str) -> Result<CooldownReport, VaultError> {
        let object = self.lookup_mut(id)?;
        let Some(mut critical) = object.as_critical() else {
            log::warn!("cooldown rejected: {id} is not critical");
            return Err(VaultError::NotCritical(id.to_string()));
        };
        let outcome = critical.emergency_cooldown();
        log::info!(
            "cooled {}: {} -> {}",
            outcome.id,
            outcome.stability_before,
            outcome.stability_after
        );
        Ok(CooldownReport {
            outcome,
            object: object.snapshot(),
        })
    }

    fn lookup_mut(&mut self, id: &str) -> Result<&mut QuantumObject, VaultError> {
        if id.is_empty() {
            return Err(VaultError::EmptyId);
        }
        self.inventory
            .find_mut(id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create;
    use crate::variant::Variant;

    fn vault() -> Vault {
        Vault::seeded(1, VaultConfig::default())
    }

    #[test]
    fn add_random_uses_counter() {
        let mut v = Vault::seeded(
            3,
            VaultConfig {
                start_counter: 7,
                ..Default::default()
            },
        );
        assert_eq!(v.add_random().unwrap().id(), "N0007");
        assert_eq!(v.add_random().unwrap().id(), "N0008");
        assert_eq!(v.summary().total, 2);
    }

    #[test]
    fn seeded_vaults_agree() {
        let mut a = vault();
        let mut b = vault();
        for _ in 0..10 {
            assert_eq!(
                a.add_random().unwrap().status_report(),
                b.add_random().unwrap().status_report()
            );
        }
    }

    #[test]
    fn analyze_missing_is_not_found() {
        let mut v = vault();
        v.add_random().unwrap();
        assert_eq!(
            v.analyze("N9999"),
            Err(VaultError::NotFound("N9999".into()))
        );
    }

    #[test]
    fn empty_id_rejected() {
        let mut v = vault();
        assert_eq!(v.analyze(""), Err(VaultError::EmptyId));
        assert_eq!(v.emergency_cooldown(""), Err(VaultError::EmptyId));
    }

    #[test]
    fn analyze_flags_low_stability() {
        let mut v = vault();
        v.add(create(Variant::DarkMatter, "D", Some(40.0), 2).unwrap());
        let r = v.analyze("D").unwrap();
        assert!(r.low_stability);
        assert_eq!(
            r.object.to_string(),
            "ID: D, Stability: 25.0, Danger: 2, Type: DarkMatter"
        );

        v.add(create(Variant::DataPacket, "P", Some(90.0), 2).unwrap());
        assert!(!v.analyze("P").unwrap().low_stability);
    }

    #[test]
    fn collapse_passes_through_and_object_stays() {
        let mut v = vault();
        v.add(create(Variant::AntiMatter, "N0002", Some(20.0), 9).unwrap());
        let err = v.analyze("N0002").unwrap_err();
        assert!(err.is_collapse());
        let zombie = v.find("N0002").unwrap();
        assert_eq!(zombie.stability().value(), 0.0);
        assert_eq!(v.summary().total, 1);
    }

    #[test]
    fn cooldown_rejects_data_packet() {
        let mut v = vault();
        v.add(create(Variant::DataPacket, "P", Some(50.0), 1).unwrap());
        assert_eq!(
            v.emergency_cooldown("P"),
            Err(VaultError::NotCritical("P".into()))
        );
        assert_eq!(v.find("P").unwrap().stability().value(), 50.0);
    }

    #[test]
    fn cooldown_on_critical() {
        let mut v = vault();
        v.add(create(Variant::DarkMatter, "N0003", Some(60.0), 4).unwrap());
        let r = v.emergency_cooldown("N0003").unwrap();
        assert_eq!(r.outcome.stability_after.value(), 100.0);
        assert_eq!(r.object.stability, 100.0);
        assert_eq!(
            r.object.to_string(),
            "ID: N0003, Stability: 100.0, Danger: 4, Type: DarkMatter"
        );
    }

    #[test]
    fn custom_warning_threshold() {
        let mut v = Vault::seeded(
            0,
            VaultConfig {
                warn_below: 90.0,
                ..Default::default()
            },
        );
        v.add(create(Variant::DataPacket, "P", Some(94.0), 1).unwrap());
        assert!(v.analyze("P").unwrap().low_stability);
    }

    #[test]
    fn custom_rng_drives_spawns() {
        use rand::rngs::SmallRng;

        let mut a = Vault::new(SmallRng::seed_from_u64(5));
        let mut b = Vault::new(SmallRng::seed_from_u64(5));
        for _ in 0..5 {
            assert_eq!(a.add_random().unwrap(), b.add_random().unwrap());
        }
        assert_eq!(a.find("N0001").map(QuantumObject::id), Some("N0001"));
        assert_eq!(a.find("N0005").map(QuantumObject::id), Some("N0005"));
    }

    #[test]
    fn exhausted_counter_surfaces_as_error() {
        let mut v = Vault::seeded(
            2,
            VaultConfig {
                start_counter: u32::MAX,
                ..Default::default()
            },
        );
        assert_eq!(v.add_random().unwrap().id(), "N4294967295");
        assert_eq!(v.add_random(), Err(VaultError::CounterExhausted));
        assert_eq!(v.summary().total, 1);
    }
}
