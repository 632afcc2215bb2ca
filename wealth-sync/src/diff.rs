//! Change detection between debt profile snapshots.
//!
//! Pure functions: given the last-loaded snapshot of a category and the
//! locally-edited one, compute the minimal create/update/delete set. Nothing
//! here touches the network; [`crate::ProfileSync`] applies the plans.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use wealth_model::{Debt, DebtCategory, DebtStrategy};

/// The operations one category needs to match the edited snapshot.
#[derive(Debug, Clone)]
pub struct CategoryPlan {
    pub category: DebtCategory,
    /// New records, ids stripped
    pub creates: Vec<Debt>,
    /// Changed records, carrying their server ids
    pub updates: Vec<Debt>,
    /// Ids of records the user removed
    pub deletes: Vec<String>,
}

impl CategoryPlan {
    fn new(category: DebtCategory) -> Self {
        Self {
            category,
            creates: Vec::new(),
            updates: Vec::new(),
            deletes: Vec::new(),
        }
    }

    /// Whether the category needs no remote calls at all.
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    /// Total number of operations in the plan.
    pub fn op_count(&self) -> usize {
        self.creates.len() + self.updates.len() + self.deletes.len()
    }
}

/// Serialize a record to its comparable form.
///
/// Server-managed timestamps are deserialize-only on the model types, so
/// they are structurally absent here; the category tag is included. Two
/// records are "unchanged" exactly when their normalized forms are equal.
pub fn normalized<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

/// Whether the strategy record changed, compared as a single unit.
pub fn strategy_changed(original: &DebtStrategy, edited: &DebtStrategy) -> bool {
    normalized(original) != normalized(edited)
}

/// Diff one category of the profile.
///
/// Walks the edited list against an id-index of the original: an entry
/// without an id becomes a create; an entry whose id is in the original
/// becomes an update when its normalized form differs (and nothing when it
/// doesn't); original ids never seen in the edited list become deletes.
///
/// An edited entry carrying an id the original snapshot doesn't know should
/// not arise from normal editing; it is logged and treated as a new record
/// with the id stripped.
pub fn diff_category(category: DebtCategory, original: &[Debt], edited: &[Debt]) -> CategoryPlan {
    let index: HashMap<&str, &Debt> = original
        .iter()
        .filter_map(|d| d.persisted_id().map(|id| (id, d)))
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut plan = CategoryPlan::new(category);

    for item in edited {
        match item.persisted_id() {
            Some(id) => {
                seen.insert(id);
                match index.get(id) {
                    Some(existing) => {
                        if normalized(*existing) != normalized(item) {
                            plan.updates.push(item.clone());
                        }
                    }
                    None => {
                        warn!(
                            category = %category,
                            id,
                            "edited entry carries an id unknown to the loaded snapshot; \
                             treating it as a new record"
                        );
                        let mut fresh = item.clone();
                        fresh.id = None;
                        plan.creates.push(fresh);
                    }
                }
            }
            None => plan.creates.push(item.clone()),
        }
    }

    for item in original {
        if let Some(id) = item.persisted_id() {
            if !seen.contains(id) {
                plan.deletes.push(id.to_string());
            }
        }
    }

    plan
}
