//! Domain model for the Wealthline debt workspace.
//!
//! This crate holds the pure data types shared by the sync and permission
//! layers: the six debt categories and their variant-specific details, the
//! per-user [`DebtProfile`] aggregate with its read-side folds, the free-form
//! [`DebtStrategy`] record, and the ordered [`SubscriptionPlan`] hierarchy.
//!
//! Everything here is I/O-free. Server-managed timestamps on persisted
//! records deserialize normally but are never serialized back, so a record
//! round-tripped through this model can never echo them to the server.

pub mod debt;
pub mod error;
pub mod plan;
pub mod profile;
pub mod strategy;

// Re-export main types
pub use debt::{Debt, DebtCategory, DebtDetails, DebtStatus};
pub use error::ValidationError;
pub use plan::SubscriptionPlan;
pub use profile::DebtProfile;
pub use strategy::{DebtStrategy, StrategyKind};
