//! Subscription plan hierarchy.

use serde::{Deserialize, Serialize};

/// Subscription tiers, ordered along the upgrade path.
///
/// Higher tiers unlock everything a lower tier can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Entry tier, no paid features
    Free = 1,
    /// Paid tier with bank linking
    Community = 2,
    /// Top tier with investing access
    Investor = 3,
}

impl SubscriptionPlan {
    /// Position in the upgrade path (higher = more privileged).
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether this plan sits strictly above another.
    pub fn is_higher_tier(&self, other: &Self) -> bool {
        self.rank() > other.rank()
    }

    /// All plans strictly above this one, in upgrade order.
    pub fn higher_tiers(&self) -> Vec<Self> {
        Self::all_ascending()
            .into_iter()
            .filter(|p| p.is_higher_tier(self))
            .collect()
    }

    /// The immediate next tier, or `None` at the top.
    pub fn next_tier(&self) -> Option<Self> {
        match self {
            Self::Free => Some(Self::Community),
            Self::Community => Some(Self::Investor),
            Self::Investor => None,
        }
    }

    /// All plans from least to most privileged.
    pub fn all_ascending() -> [Self; 3] {
        [Self::Free, Self::Community, Self::Investor]
    }

    /// Get the wire identifier for this plan.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Community => "community",
            Self::Investor => "investor",
        }
    }

    /// Human-readable name for upgrade prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Community => "Community",
            Self::Investor => "Investor",
        }
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        Self::Free
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_ordering() {
        assert!(SubscriptionPlan::Investor.is_higher_tier(&SubscriptionPlan::Community));
        assert!(SubscriptionPlan::Community.is_higher_tier(&SubscriptionPlan::Free));
        assert!(!SubscriptionPlan::Free.is_higher_tier(&SubscriptionPlan::Free));
        assert!(SubscriptionPlan::Free < SubscriptionPlan::Investor);
    }

    #[test]
    fn test_next_tier_walks_upgrade_path() {
        assert_eq!(
            SubscriptionPlan::Free.next_tier(),
            Some(SubscriptionPlan::Community)
        );
        assert_eq!(
            SubscriptionPlan::Community.next_tier(),
            Some(SubscriptionPlan::Investor)
        );
        assert_eq!(SubscriptionPlan::Investor.next_tier(), None);
    }

    #[test]
    fn test_higher_tiers_are_ordered() {
        assert_eq!(
            SubscriptionPlan::Free.higher_tiers(),
            vec![SubscriptionPlan::Community, SubscriptionPlan::Investor]
        );
        assert!(SubscriptionPlan::Investor.higher_tiers().is_empty());
    }

    #[test]
    fn test_plan_serialization() {
        let json = serde_json::to_string(&SubscriptionPlan::Community).unwrap();
        assert_eq!(json, "\"community\"");

        let parsed: SubscriptionPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SubscriptionPlan::Community);
    }
}
