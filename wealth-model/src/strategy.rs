//! The per-user debt strategy record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The payoff approach a user has chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// No strategy selected yet
    None,
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
    /// Roll balances into a consolidation loan
    Consolidation,
    /// Negotiate settlements with lenders
    Settlement,
}

impl Default for StrategyKind {
    fn default() -> Self {
        Self::None
    }
}

/// A user's single strategy record.
///
/// Compared and persisted as one unit, never field-by-field. Timestamps are
/// server-managed and deserialize-only, as on [`crate::Debt`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtStrategy {
    /// Server-assigned identifier; absent until first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: StrategyKind,
    /// Free-form consolidation plan text
    #[serde(default)]
    pub consolidation_plan: Option<String>,
    #[serde(default)]
    pub considering_bankruptcy: bool,
    #[serde(default)]
    pub bankruptcy_details: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DebtStrategy {
    /// The server-assigned id, if this record has been persisted.
    pub fn persisted_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
