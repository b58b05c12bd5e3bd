//! Clamped stability quantity.
//!
//! Stability always lives in `[0, 100]`. Clamping is an explicit step
//! ([`Stability::clamp`]) rather than something hidden inside a setter, and a
//! missing value is rejected instead of silently defaulted.

use std::fmt;

use crate::error::InvalidValue;

/// Stability of a quantum object, guaranteed to be within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Stability(f64);

impl Stability {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Fully stable.
    pub const FULL: Stability = Stability(Self::MAX);
    /// Collapsed.
    pub const ZERO: Stability = Stability(Self::MIN);

    /// Clamp a raw value into `[MIN, MAX]`.
    pub fn clamp(value: f64) -> f64 {
        value.clamp(Self::MIN, Self::MAX)
    }

    /// Validate and clamp. NaN counts as "unset" and is rejected.
    pub fn new(value: f64) -> Result<Self, InvalidValue> {
        if value.is_nan() {
            return Err(InvalidValue::MissingStability);
        }
        Ok(Self(Self::clamp(value)))
    }

    /// Like [`Stability::new`], with absence spelled as `None`.
    pub fn from_option(value: Option<f64>) -> Result<Self, InvalidValue> {
        match value {
            Some(v) => Self::new(v),
            None => Err(InvalidValue::MissingStability),
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Stability after losing `amount`, clamped at zero.
    pub fn decreased_by(self, amount: f64) -> Self {
        Self(Self::clamp(self.0 - amount))
    }

    /// Stability after gaining `amount`, clamped at one hundred.
    pub fn increased_by(self, amount: f64) -> Self {
        Self(Self::clamp(self.0 + amount))
    }

    /// Nothing left: the object has collapsed.
    pub fn is_depleted(self) -> bool {
        self.0 <= Self::MIN
    }

    /// Ten-cell gauge, one filled cell per full ten points.
    pub fn gauge(self) -> String {
        let filled = ((self.0 / 10.0) as usize).min(10);
        format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
