//! Plan-based feature gating.
//!
//! A [`PermissionEngine`] holds an immutable rule table mapping
//! `(feature, action)` pairs to the subscription plans allowed to use them,
//! and derives a fresh [`FeatureGate`] on every check. The engine is pure,
//! synchronous, and never panics: absent data degrades to the configured
//! [`DefaultPolicy`] or `None`.
//!
//! # Example
//!
//! ```
//! use wealth_model::SubscriptionPlan;
//! use wealth_permissions::PermissionEngine;
//!
//! let engine = PermissionEngine::standard();
//! let gate = engine.check(SubscriptionPlan::Free, "plaid", "connect");
//! assert!(!gate.allowed);
//! assert!(gate.upgrade_message.is_some());
//! ```

pub mod engine;
pub mod rules;

// Re-export main types
pub use engine::{FeatureGate, PermissionEngine};
pub use rules::{standard_rules, DefaultPolicy, PermissionRule};
