//! Profile reconciliation against the remote store.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wealth_model::{DebtCategory, DebtProfile, DebtStrategy, ValidationError};

use crate::diff::{diff_category, strategy_changed, CategoryPlan};
use crate::error::StoreError;
use crate::store::DebtStore;

/// Where in a save a failure landed: one of the six categories, or the
/// strategy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveSlot {
    Category(DebtCategory),
    Strategy,
}

impl std::fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(c) => f.write_str(c.as_str()),
            Self::Strategy => f.write_str("strategy"),
        }
    }
}

/// One failed slot of a save, with the error that stopped it.
#[derive(Debug)]
pub struct SlotFailure {
    pub slot: SaveSlot,
    pub error: StoreError,
}

/// What went wrong during a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The edited profile failed local validation; no remote call was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// One or more slots failed; everything else remains committed
    /// server-side
    #[error("debt profile save incomplete: {} slot(s) failed", .failures.len())]
    Incomplete {
        /// Slots that completed, with their operation counts
        completed: Vec<CategoryOutcome>,
        /// Every failure observed, one per slot
        failures: Vec<SlotFailure>,
    },
}

/// Operation counts for one reconciled category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: DebtCategory,
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl CategoryOutcome {
    fn op_count(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

/// Result of a fully-successful save.
///
/// Only categories that needed remote calls appear; an untouched category
/// issues none and is omitted.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    pub categories: Vec<CategoryOutcome>,
    /// Whether the strategy record was created or replaced
    pub strategy_updated: bool,
}

impl SaveReport {
    /// Total remote write operations issued, strategy included.
    pub fn total_operations(&self) -> usize {
        let debts: usize = self.categories.iter().map(|c| c.op_count()).sum();
        debts + usize::from(self.strategy_updated)
    }
}

/// Reconciles edited debt profiles against the remote store.
///
/// Both snapshots handed to [`save_profile`](Self::save_profile) are
/// read-only inputs; the caller's data is never mutated. The authoritative
/// profile stays server-side, so after a save the caller is expected to
/// [`load_profile`](Self::load_profile) again rather than trust its local
/// copy.
pub struct ProfileSync {
    store: Arc<dyn DebtStore>,
}

impl ProfileSync {
    /// Create a sync engine over a store.
    pub fn new(store: Arc<dyn DebtStore>) -> Self {
        Self { store }
    }

    /// Load a user's full profile from the server.
    ///
    /// A user with no strategy record yet gets the default strategy.
    pub async fn load_profile(&self, user_id: &str) -> Result<DebtProfile, StoreError> {
        let debts = self.store.list_debts(user_id, None).await?;

        let mut profile = DebtProfile::default();
        for debt in debts {
            profile.add(debt);
        }

        profile.strategy = match self.store.get_strategy(user_id).await {
            Ok(strategy) => strategy,
            Err(StoreError::NotFound(_)) => DebtStrategy::default(),
            Err(e) => return Err(e),
        };

        Ok(profile)
    }

    /// Persist the difference between two profile snapshots.
    ///
    /// Validates the edited profile before any remote call, then reconciles
    /// the six categories independently and the strategy record last. A
    /// failure in one slot never suppresses the others: every slot is
    /// attempted and every failure observed is surfaced together. There is
    /// no rollback; operations that succeeded remain committed.
    pub async fn save_profile(
        &self,
        user_id: &str,
        original: &DebtProfile,
        edited: &DebtProfile,
    ) -> Result<SaveReport, SaveError> {
        edited.validate()?;

        let mut completed = Vec::new();
        let mut failures = Vec::new();

        for category in DebtCategory::all() {
            let plan = diff_category(
                category,
                original.category(category),
                edited.category(category),
            );
            if plan.is_empty() {
                continue;
            }

            match self.apply_category(user_id, plan).await {
                Ok(outcome) => completed.push(outcome),
                Err(error) => failures.push(SlotFailure {
                    slot: SaveSlot::Category(category),
                    error,
                }),
            }
        }

        let mut strategy_updated = false;
        match self
            .sync_strategy(user_id, &original.strategy, &edited.strategy)
            .await
        {
            Ok(updated) => strategy_updated = updated,
            Err(error) => failures.push(SlotFailure {
                slot: SaveSlot::Strategy,
                error,
            }),
        }

        if failures.is_empty() {
            info!(
                user_id = %user_id,
                categories = completed.len(),
                strategy_updated,
                "debt profile saved"
            );
            Ok(SaveReport {
                categories: completed,
                strategy_updated,
            })
        } else {
            warn!(
                user_id = %user_id,
                failed = failures.len(),
                "debt profile save incomplete"
            );
            Err(SaveError::Incomplete {
                completed,
                failures,
            })
        }
    }

    /// Apply one category's plan. The first operation error marks the whole
    /// category incomplete.
    async fn apply_category(
        &self,
        user_id: &str,
        plan: CategoryPlan,
    ) -> Result<CategoryOutcome, StoreError> {
        let CategoryPlan {
            category,
            creates,
            updates,
            deletes,
        } = plan;

        let outcome = CategoryOutcome {
            category,
            created: creates.len(),
            updated: updates.len(),
            deleted: deletes.len(),
        };

        for debt in &creates {
            debug!(category = %category, lender = %debt.lender, "creating debt record");
            self.store.create_debt(user_id, debt).await?;
        }

        for debt in &updates {
            let Some(id) = debt.persisted_id() else {
                warn!(category = %category, "update entry without an id skipped");
                continue;
            };
            debug!(category = %category, id, "updating debt record");
            self.store.update_debt(id, debt).await?;
        }

        for id in &deletes {
            debug!(category = %category, id = %id, "deleting debt record");
            self.store.delete_debt(id).await?;
        }

        Ok(outcome)
    }

    /// Reconcile the strategy record as a single unit.
    ///
    /// Returns whether a write was issued.
    async fn sync_strategy(
        &self,
        user_id: &str,
        original: &DebtStrategy,
        edited: &DebtStrategy,
    ) -> Result<bool, StoreError> {
        if !strategy_changed(original, edited) {
            return Ok(false);
        }

        match self.store.get_strategy(user_id).await {
            Ok(existing) => {
                let id = existing.persisted_id().ok_or_else(|| {
                    StoreError::InvalidResponse("stored strategy record has no id".to_string())
                })?;
                debug!(user_id = %user_id, id, "updating strategy record");
                self.store.update_strategy(id, edited).await?;
                Ok(true)
            }
            Err(StoreError::NotFound(_)) => {
                let mut fresh = edited.clone();
                fresh.id = None;
                debug!(user_id = %user_id, "creating strategy record");

                match self.store.create_strategy(user_id, &fresh).await {
                    Ok(_) => Ok(true),
                    Err(StoreError::Conflict { existing_id }) => {
                        // Lost a create race; the record exists now, so
                        // write through it instead.
                        warn!(user_id = %user_id, "strategy create conflicted, retrying as update");
                        let id = match existing_id {
                            Some(id) => id,
                            None => {
                                let current = self.store.get_strategy(user_id).await?;
                                current.persisted_id().map(str::to_string).ok_or_else(|| {
                                    StoreError::InvalidResponse(
                                        "stored strategy record has no id".to_string(),
                                    )
                                })?
                            }
                        };
                        self.store.update_strategy(&id, edited).await?;
                        Ok(true)
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }
}
