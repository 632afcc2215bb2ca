//! The feature-gating engine.

use std::collections::HashMap;

use wealth_model::SubscriptionPlan;

use crate::rules::{standard_rules, DefaultPolicy, PermissionRule};

/// The outcome of one permission check.
///
/// Computed fresh on every call; never cached beyond the check itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGate {
    pub allowed: bool,
    pub user_plan: SubscriptionPlan,
    /// Plans that would be allowed, in hierarchy order; empty when no rule
    /// applies
    pub required_plans: Vec<SubscriptionPlan>,
    /// Upgrade prompt naming the minimum qualifying plan; set only on denial
    pub upgrade_message: Option<String>,
}

/// Decides feature access from an immutable rule table.
///
/// The table is injected at construction; there is no global state. Lookups
/// never fail: a missing rule falls back to the engine's [`DefaultPolicy`].
pub struct PermissionEngine {
    rules: HashMap<(String, String), Vec<SubscriptionPlan>>,
    default_policy: DefaultPolicy,
}

impl PermissionEngine {
    /// Build an engine from a rule set, with the default `Allow` fallback.
    pub fn new(rules: impl IntoIterator<Item = PermissionRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|r| ((r.feature, r.action), r.plans))
            .collect();
        Self {
            rules,
            default_policy: DefaultPolicy::default(),
        }
    }

    /// Build an engine over the application's shipped rule table.
    pub fn standard() -> Self {
        Self::new(standard_rules())
    }

    /// Set the policy applied when no rule exists for a pair.
    pub fn with_default_policy(mut self, policy: DefaultPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Decide whether `user_plan` may perform `action` on `feature`.
    pub fn check(&self, user_plan: SubscriptionPlan, feature: &str, action: &str) -> FeatureGate {
        let Some(allowed_plans) = self.lookup(feature, action) else {
            // Undeclared pair: the configured default decides.
            return FeatureGate {
                allowed: self.default_policy == DefaultPolicy::Allow,
                user_plan,
                required_plans: Vec::new(),
                upgrade_message: None,
            };
        };

        let allowed = allowed_plans.contains(&user_plan);
        let upgrade_message = if allowed {
            None
        } else {
            self.minimum_plan(feature, action).map(|min| {
                format!(
                    "Upgrade to the {} plan or higher to use this feature.",
                    min.display_name()
                )
            })
        };

        FeatureGate {
            allowed,
            user_plan,
            required_plans: allowed_plans.to_vec(),
            upgrade_message,
        }
    }

    /// The lowest plan in the hierarchy allowed for the pair, or `None` when
    /// no rule exists or its allowed set is empty.
    pub fn minimum_plan(&self, feature: &str, action: &str) -> Option<SubscriptionPlan> {
        let allowed = self.lookup(feature, action)?;
        SubscriptionPlan::all_ascending()
            .into_iter()
            .find(|plan| allowed.contains(plan))
    }

    fn lookup(&self, feature: &str, action: &str) -> Option<&[SubscriptionPlan]> {
        self.rules
            .get(&(feature.to_string(), action.to_string()))
            .map(|plans| plans.as_slice())
    }
}
