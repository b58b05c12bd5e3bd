//! # quantumvault-core
//!
//! **A vault full of things that should not be looked at too closely.**
//!
//! `quantumvault-core` models an inventory of quantum objects. Every object
//! has a stability in `[0, 100]` that drops each time it is analyzed. When
//! stability runs out the object collapses, and the caller decides what that
//! means for the session.
//!
//! ## Quick Start
//!
//! ```
//! use quantumvault_core::{Variant, Vault, VaultConfig, create};
//!
//! let mut vault = Vault::seeded(42, VaultConfig::default());
//! vault.add(create(Variant::DataPacket, "N0001", Some(100.0), 5).unwrap());
//!
//! let report = vault.analyze("N0001").unwrap();
//! assert_eq!(report.outcome.message, "data content read");
//! assert_eq!(vault.find("N0001").unwrap().stability().value(), 95.0);
//! ```
//!
//! ## Variants
//!
//! | Variant | Decay | Cooldown |
//! |---|---|---|
//! | [`Variant::DataPacket`] | 5 | no |
//! | [`Variant::DarkMatter`] | 15 | yes |
//! | [`Variant::AntiMatter`] | 25 | yes |
//!
//! Emergency cooldown (+50, capped at 100) exists only on critical objects:
//! [`QuantumObject::as_critical`] hands out a [`CriticalObject`] for dark
//! matter and antimatter and `None` for a data packet.

pub mod critical;
pub mod error;
pub mod factory;
pub mod inventory;
pub mod object;
pub mod report;
pub mod stability;
pub mod variant;
pub mod vault;

pub use critical::{COOLDOWN_BOOST, CooldownOutcome, Critical, CriticalObject};
pub use error::{CollapseEvent, InvalidValue, VaultError};
pub use factory::{ObjectFactory, create, format_id};
pub use inventory::{Inventory, Listing, StatusReports};
pub use object::{AnalysisOutcome, DangerLevel, ObjectId, QuantumObject};
pub use report::{InventorySummary, StatusReport};
pub use stability::Stability;
pub use variant::{ParseVariantError, Variant};
pub use vault::{AnalyzeReport, CooldownReport, DEFAULT_WARN_BELOW, Vault, VaultConfig};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
