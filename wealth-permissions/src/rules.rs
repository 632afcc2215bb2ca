//! Permission rules and the policy for undeclared features.

use serde::{Deserialize, Serialize};
use wealth_model::SubscriptionPlan;

/// One row of the rule table: which plans may perform `action` on `feature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub feature: String,
    pub action: String,
    /// Plans allowed to use the feature; kept in hierarchy order
    pub plans: Vec<SubscriptionPlan>,
}

impl PermissionRule {
    /// Create a rule. The allowed set is normalized into hierarchy order.
    pub fn new(
        feature: impl Into<String>,
        action: impl Into<String>,
        plans: impl IntoIterator<Item = SubscriptionPlan>,
    ) -> Self {
        let mut plans: Vec<SubscriptionPlan> = plans.into_iter().collect();
        plans.sort();
        plans.dedup();
        Self {
            feature: feature.into(),
            action: action.into(),
            plans,
        }
    }
}

/// What a check returns when no rule exists for a `(feature, action)` pair.
///
/// The shipped behavior is `Allow`: undeclared features are unrestricted.
/// Deployments that want to gate everything they haven't declared can
/// construct the engine with `Deny` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPolicy {
    Allow,
    Deny,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self::Allow
    }
}

/// The rule table shipped with the application.
pub fn standard_rules() -> Vec<PermissionRule> {
    use wealth_model::SubscriptionPlan::{Community, Investor};

    vec![
        PermissionRule::new("plaid", "connect", [Community, Investor]),
        PermissionRule::new("plaid", "refresh", [Community, Investor]),
        PermissionRule::new("invest", "access", [Investor]),
        PermissionRule::new("debts", "strategy", [Community, Investor]),
        PermissionRule::new("wealth", "export", [Community, Investor]),
    ]
}
