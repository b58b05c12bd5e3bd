//! Object construction: explicit and randomized.
//!
//! Randomness and the id counter are both passed in, so a seeded RNG plus a
//! fixed starting counter reproduce the same objects every run.

use rand::Rng;

use crate::error::{InvalidValue, VaultError};
use crate::object::QuantumObject;
use crate::variant::Variant;

/// Lower bound (inclusive) of a spawned object's stability.
pub const SPAWN_STABILITY_MIN: f64 = 50.0;
/// Upper bound (exclusive) of a spawned object's stability.
pub const SPAWN_STABILITY_MAX: f64 = 100.0;

/// Build an object from explicit values.
pub fn create(
    variant: Variant,
    id: impl Into<String>,
    stability: Option<f64>,
    danger: i64,
) -> Result<QuantumObject, InvalidValue> {
    QuantumObject::new(variant, id, stability, danger)
}

/// `N` followed by the counter, zero-padded to four digits.
pub fn format_id(counter: u32) -> String {
    format!("N{counter:04}")
}

/// Monotonic id counter plus random object generation.
///
/// The counter never wraps: once `N4294967295` has been handed out, further
/// ids are refused with [`VaultError::CounterExhausted`].
#[derive(Debug, Clone)]
pub struct ObjectFactory {
    next: Option<u32>,
}

impl ObjectFactory {
    /// Counter starting at 1 (`N0001`).
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u32) -> Self {
        Self { next: Some(next) }
    }

    /// Counter value the next id will use, `None` once exhausted.
    pub fn peek(&self) -> Option<u32> {
        self.next
    }

    /// Take the next id and advance the counter.
    pub fn next_id(&mut self) -> Result<String, VaultError> {
        let current = self.next.ok_or(VaultError::CounterExhausted)?;
        self.next = current.checked_add(1);
        Ok(format_id(current))
    }

    /// Spawn a random object with the next id.
    ///
    /// Variant is uniform over the three kinds, stability uniform in
    /// `[50, 100)`, danger uniform in `[1, 10]`.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> Result<QuantumObject, VaultError> {
        let id = self.next_id()?;
        let variant = Variant::ALL[rng.random_range(0..Variant::ALL.len())];
        let stability = rng.random_range(SPAWN_STABILITY_MIN..SPAWN_STABILITY_MAX);
        let danger: i64 = rng.random_range(1..=10);
        Ok(create(variant, id, Some(stability), danger)?)
    }
}

impl Default for ObjectFactory {
    fn default() -> Self {
        Self::new()
    }
}
