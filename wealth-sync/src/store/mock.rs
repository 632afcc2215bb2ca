//! In-memory debt store for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use wealth_model::{Debt, DebtCategory, DebtStrategy};

use crate::error::{Result, StoreError};
use crate::store::DebtStore;

/// One recorded store call, with the data as the caller sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    ListDebts {
        user_id: String,
        category: Option<DebtCategory>,
    },
    CreateDebt {
        user_id: String,
        debt: Debt,
    },
    UpdateDebt {
        id: String,
        debt: Debt,
    },
    DeleteDebt {
        id: String,
    },
    GetStrategy {
        user_id: String,
    },
    CreateStrategy {
        user_id: String,
        strategy: DebtStrategy,
    },
    UpdateStrategy {
        id: String,
        strategy: DebtStrategy,
    },
}

/// Mock store for testing.
///
/// Records every call, assigns deterministic ids, and can be told to fail
/// whole operation kinds or to report a conflict on strategy creation.
#[derive(Default)]
pub struct MockDebtStore {
    debts: Mutex<Vec<Debt>>,
    strategy: Mutex<Option<DebtStrategy>>,
    ops: Mutex<Vec<StoreOp>>,
    fail_kinds: Mutex<HashSet<&'static str>>,
    conflict_on_create_strategy: Mutex<Option<String>>,
    next_id: AtomicU32,
}

impl MockDebtStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a debt record, assigning an id if it has none.
    pub fn with_debt(self, mut debt: Debt) -> Self {
        if debt.persisted_id().is_none() {
            debt.id = Some(self.mint_id("debt"));
        }
        self.debts.lock().unwrap().push(debt);
        self
    }

    /// Seed the stored strategy record, assigning an id if it has none.
    pub fn with_strategy(self, mut strategy: DebtStrategy) -> Self {
        if strategy.persisted_id().is_none() {
            strategy.id = Some(self.mint_id("strategy"));
        }
        *self.strategy.lock().unwrap() = Some(strategy);
        self
    }

    /// Make every call of the named kind fail with a server error.
    ///
    /// Kinds are the trait method names, e.g. `"update_debt"`.
    pub fn with_failure(self, kind: &'static str) -> Self {
        self.fail_kinds.lock().unwrap().insert(kind);
        self
    }

    /// Make `create_strategy` report a conflict naming `existing_id`, as a
    /// server would when a concurrent create won the race.
    pub fn with_strategy_conflict(self, existing_id: impl Into<String>) -> Self {
        *self.conflict_on_create_strategy.lock().unwrap() = Some(existing_id.into());
        self
    }

    /// Every call recorded so far, in order.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Number of calls recorded so far.
    pub fn op_count(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    /// Current stored debts.
    pub fn debts(&self) -> Vec<Debt> {
        self.debts.lock().unwrap().clone()
    }

    /// A stored debt by id.
    pub fn debt(&self, id: &str) -> Option<Debt> {
        self.debts
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.persisted_id() == Some(id))
            .cloned()
    }

    /// The stored strategy record, if any.
    pub fn stored_strategy(&self) -> Option<DebtStrategy> {
        self.strategy.lock().unwrap().clone()
    }

    fn mint_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", prefix, n)
    }

    fn record(&self, op: StoreOp) {
        self.ops.lock().unwrap().push(op);
    }

    fn check_fail(&self, kind: &'static str) -> Result<()> {
        if self.fail_kinds.lock().unwrap().contains(kind) {
            return Err(StoreError::Server {
                status: 500,
                message: format!("injected failure: {}", kind),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DebtStore for MockDebtStore {
    async fn list_debts(
        &self,
        user_id: &str,
        category: Option<DebtCategory>,
    ) -> Result<Vec<Debt>> {
        self.record(StoreOp::ListDebts {
            user_id: user_id.to_string(),
            category,
        });
        self.check_fail("list_debts")?;

        let debts = self.debts.lock().unwrap();
        Ok(debts
            .iter()
            .filter(|d| category.map_or(true, |c| d.category() == c))
            .cloned()
            .collect())
    }

    async fn create_debt(&self, user_id: &str, debt: &Debt) -> Result<Debt> {
        self.record(StoreOp::CreateDebt {
            user_id: user_id.to_string(),
            debt: debt.clone(),
        });
        self.check_fail("create_debt")?;

        // The server assigns the id regardless of what the client sent.
        let mut stored = debt.clone();
        stored.id = Some(self.mint_id("debt"));
        stored.created_at = Some(Utc::now());
        stored.updated_at = stored.created_at;

        self.debts.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_debt(&self, id: &str, debt: &Debt) -> Result<Debt> {
        self.record(StoreOp::UpdateDebt {
            id: id.to_string(),
            debt: debt.clone(),
        });
        self.check_fail("update_debt")?;

        let mut debts = self.debts.lock().unwrap();
        let existing = debts
            .iter_mut()
            .find(|d| d.persisted_id() == Some(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut stored = debt.clone();
        stored.id = Some(id.to_string());
        stored.created_at = existing.created_at;
        stored.updated_at = Some(Utc::now());
        *existing = stored.clone();
        Ok(stored)
    }

    async fn delete_debt(&self, id: &str) -> Result<()> {
        self.record(StoreOp::DeleteDebt { id: id.to_string() });
        self.check_fail("delete_debt")?;

        let mut debts = self.debts.lock().unwrap();
        let before = debts.len();
        debts.retain(|d| d.persisted_id() != Some(id));
        if debts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn get_strategy(&self, user_id: &str) -> Result<DebtStrategy> {
        self.record(StoreOp::GetStrategy {
            user_id: user_id.to_string(),
        });
        self.check_fail("get_strategy")?;

        self.strategy
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| StoreError::NotFound(format!("strategy for {}", user_id)))
    }

    async fn create_strategy(
        &self,
        user_id: &str,
        strategy: &DebtStrategy,
    ) -> Result<DebtStrategy> {
        self.record(StoreOp::CreateStrategy {
            user_id: user_id.to_string(),
            strategy: strategy.clone(),
        });
        self.check_fail("create_strategy")?;

        if let Some(existing_id) = self.conflict_on_create_strategy.lock().unwrap().clone() {
            return Err(StoreError::Conflict {
                existing_id: Some(existing_id),
            });
        }

        let mut stored = strategy.clone();
        stored.id = Some(self.mint_id("strategy"));
        stored.created_at = Some(Utc::now());
        stored.updated_at = stored.created_at;

        *self.strategy.lock().unwrap() = Some(stored.clone());
        Ok(stored)
    }

    async fn update_strategy(&self, id: &str, strategy: &DebtStrategy) -> Result<DebtStrategy> {
        self.record(StoreOp::UpdateStrategy {
            id: id.to_string(),
            strategy: strategy.clone(),
        });
        self.check_fail("update_strategy")?;

        let mut stored = strategy.clone();
        stored.id = Some(id.to_string());
        stored.updated_at = Some(Utc::now());

        *self.strategy.lock().unwrap() = Some(stored.clone());
        Ok(stored)
    }
}
