//! Remote debt store client and profile reconciliation.
//!
//! The [`DebtStore`] trait is the seam to the remote profile API;
//! [`HttpDebtStore`] is the production implementation and
//! [`MockDebtStore`] the in-memory one used in tests. [`ProfileSync`] sits
//! on top: given the last-loaded snapshot of a [`wealth_model::DebtProfile`]
//! and the locally-edited one, it computes the minimal create/update/delete
//! set per category ([`diff::diff_category`]) and applies it, reconciling
//! the strategy record last.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wealth_sync::{HttpDebtStore, ProfileSync, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = HttpDebtStore::new(StoreConfig {
//!     base_url: "https://api.wealthline.app".into(),
//!     ..Default::default()
//! });
//! let sync = ProfileSync::new(Arc::new(store));
//!
//! let original = sync.load_profile("user-1").await?;
//! let mut edited = original.clone();
//! edited.credit_cards[0].current_balance = 600.0;
//!
//! let report = sync.save_profile("user-1", &original, &edited).await?;
//! assert_eq!(report.total_operations(), 1);
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod error;
pub mod reconcile;
pub mod store;

// Re-export main types
pub use diff::{diff_category, normalized, strategy_changed, CategoryPlan};
pub use error::{Result, StoreError};
pub use reconcile::{CategoryOutcome, ProfileSync, SaveError, SaveReport, SaveSlot, SlotFailure};
pub use store::{DebtStore, HttpDebtStore, MockDebtStore, StoreConfig, StoreOp};
