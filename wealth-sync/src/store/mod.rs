//! The remote debt store seam.
//!
//! [`DebtStore`] abstracts the profile API the reconciler writes through.
//! [`HttpDebtStore`] talks to the real backend; [`MockDebtStore`] is the
//! in-memory implementation used by the reconciliation tests.

use async_trait::async_trait;

use wealth_model::{Debt, DebtCategory, DebtStrategy};

use crate::error::Result;

pub mod http;
pub mod mock;

pub use http::{HttpDebtStore, StoreConfig};
pub use mock::{MockDebtStore, StoreOp};

/// Remote store for debt records and the per-user strategy record.
///
/// Contract: `create_*` ignores any client-supplied id (the server assigns
/// one), `update_*`/`delete_debt` operate by server-assigned id, and
/// `get_strategy` reports absence as [`crate::StoreError::NotFound`] so the
/// caller can pick create over update.
#[async_trait]
pub trait DebtStore: Send + Sync {
    /// List a user's debts, optionally restricted to one category.
    async fn list_debts(&self, user_id: &str, category: Option<DebtCategory>)
        -> Result<Vec<Debt>>;

    /// Create a debt record; returns the stored record with its new id.
    async fn create_debt(&self, user_id: &str, debt: &Debt) -> Result<Debt>;

    /// Replace a debt record by id.
    async fn update_debt(&self, id: &str, debt: &Debt) -> Result<Debt>;

    /// Delete a debt record by id.
    async fn delete_debt(&self, id: &str) -> Result<()>;

    /// Fetch the user's strategy record; `NotFound` when none exists.
    async fn get_strategy(&self, user_id: &str) -> Result<DebtStrategy>;

    /// Create the user's strategy record.
    async fn create_strategy(&self, user_id: &str, strategy: &DebtStrategy)
        -> Result<DebtStrategy>;

    /// Replace a strategy record by id.
    async fn update_strategy(&self, id: &str, strategy: &DebtStrategy) -> Result<DebtStrategy>;
}
