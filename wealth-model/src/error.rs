//! Validation errors raised before any remote call is issued.

use thiserror::Error;

use crate::debt::DebtCategory;

/// A locally-detectable problem with a record the user is trying to save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Lender is required on every debt
    #[error("{category} entry is missing a lender")]
    MissingLender { category: DebtCategory },

    /// Balances and payments must be non-negative
    #[error("{category} {field} cannot be negative")]
    NegativeAmount {
        category: DebtCategory,
        field: &'static str,
    },
}
