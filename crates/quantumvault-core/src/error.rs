//! Error types for the vault core.
//!
//! Three families:
//! - [`InvalidValue`]: a property failed validation. Always recoverable.
//! - [`CollapseEvent`]: an object ran out of stability during analysis.
//! - [`VaultError`]: what a driver sees when dispatching by id.

use thiserror::Error;

/// A property value was rejected at construction or assignment time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    #[error("invalid id: must not be empty")]
    EmptyId,

    #[error("invalid stability: value must be set")]
    MissingStability,

    #[error("invalid danger level {0}: must be between 1 and 10")]
    DangerOutOfRange(i64),
}

/// An object's stability reached zero while being analyzed.
///
/// This is a designed outcome of the simulation, not an internal fault. The
/// collapsed object stays in the inventory at stability 0.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("quantum collapse! object {id} destabilized")]
pub struct CollapseEvent {
    /// Id of the object that collapsed.
    pub id: String,
}

impl CollapseEvent {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Failure of a by-id operation dispatched through a [`crate::Vault`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("no object id given")]
    EmptyId,

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object {0} cannot be cooled (not a critical object)")]
    NotCritical(String),

    #[error("id counter exhausted: no ids left after N{}", u32::MAX)]
    CounterExhausted,

    #[error(transparent)]
    Invalid(#[from] InvalidValue),

    #[error(transparent)]
    Collapse(#[from] CollapseEvent),
}

impl VaultError {
    /// True when this error is the terminal collapse condition.
    pub fn is_collapse(&self) -> bool {
        matches!(self, Self::Collapse(_))
    }
}
