//! Profile reconciliation integration tests
//!
//! Drives `ProfileSync` end-to-end against the in-memory mock store:
//! - minimal create/update/delete sets per category
//! - timestamp insensitivity and no-op saves
//! - strategy create/update and the create-conflict retry
//! - failure aggregation across categories

use std::sync::Arc;

use wealth_model::{
    Debt, DebtCategory, DebtDetails, DebtProfile, DebtStrategy, StrategyKind,
};
use wealth_sync::{MockDebtStore, ProfileSync, SaveError, SaveSlot, StoreOp};

fn debt(id: Option<&str>, lender: &str, category: DebtCategory, balance: f64) -> Debt {
    let mut d = Debt::new(lender, DebtDetails::empty(category));
    d.id = id.map(String::from);
    d.current_balance = balance;
    d.monthly_payment = balance / 20.0;
    d.interest_rate = 10.0;
    d
}

fn profile_with(debts: Vec<Debt>) -> DebtProfile {
    let mut profile = DebtProfile::default();
    for d in debts {
        profile.add(d);
    }
    profile
}

// =============================================================================
// No-op and single-operation saves
// =============================================================================

#[tokio::test]
async fn test_identical_snapshots_issue_zero_calls() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![
        debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0),
        debt(Some("m1"), "Chase", DebtCategory::Mortgage, 200_000.0),
    ]);
    let edited = original.clone();

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(report.total_operations(), 0);
    assert!(!report.strategy_updated);
    assert_eq!(store.op_count(), 0);
}

#[tokio::test]
async fn test_balance_change_issues_exactly_one_update() {
    let store = Arc::new(
        MockDebtStore::new().with_debt(debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0)),
    );
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![debt(
        Some("c1"),
        "Visa",
        DebtCategory::CreditCard,
        500.0,
    )]);
    let mut edited = original.clone();
    edited.credit_cards[0].current_balance = 600.0;

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(report.total_operations(), 1);
    let ops = store.ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        StoreOp::UpdateDebt { id, debt } => {
            assert_eq!(id, "c1");
            assert_eq!(debt.current_balance, 600.0);
            assert_eq!(debt.lender, "Visa");
        }
        other => panic!("expected UpdateDebt, got {:?}", other),
    }
    assert_eq!(store.debt("c1").unwrap().current_balance, 600.0);
}

#[tokio::test]
async fn test_added_entry_issues_exactly_one_create_without_id() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile::default();
    let mut edited = original.clone();
    edited.add(debt(None, "Navient", DebtCategory::StudentLoan, 12_000.0));

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(report.total_operations(), 1);
    let ops = store.ops();
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        StoreOp::CreateDebt { user_id, debt } => {
            assert_eq!(user_id, "user-1");
            assert!(debt.id.is_none());
            assert_eq!(debt.lender, "Navient");
        }
        other => panic!("expected CreateDebt, got {:?}", other),
    }
    assert_eq!(store.debts().len(), 1);
    assert!(store.debts()[0].is_persisted());
}

#[tokio::test]
async fn test_removed_entry_issues_exactly_one_delete() {
    let store = Arc::new(
        MockDebtStore::new().with_debt(debt(Some("a1"), "Ally", DebtCategory::AutoLoan, 18_000.0)),
    );
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![debt(
        Some("a1"),
        "Ally",
        DebtCategory::AutoLoan,
        18_000.0,
    )]);
    let mut edited = original.clone();
    edited.auto_loans.clear();

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(report.total_operations(), 1);
    assert_eq!(
        store.ops(),
        vec![StoreOp::DeleteDebt { id: "a1".into() }]
    );
    assert!(store.debts().is_empty());
}

#[tokio::test]
async fn test_timestamp_only_differences_issue_zero_calls() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let mut original = profile_with(vec![debt(
        Some("c1"),
        "Visa",
        DebtCategory::CreditCard,
        500.0,
    )]);
    original.credit_cards[0].created_at = Some(chrono::Utc::now());
    original.credit_cards[0].updated_at = Some(chrono::Utc::now());

    let mut edited = original.clone();
    edited.credit_cards[0].created_at = None;
    edited.credit_cards[0].updated_at = None;

    sync.save_profile("user-1", &original, &edited).await.unwrap();
    assert_eq!(store.op_count(), 0);
}

// =============================================================================
// Strategy record reconciliation
// =============================================================================

#[tokio::test]
async fn test_changed_strategy_created_when_server_has_none() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile::default();
    let mut edited = original.clone();
    edited.strategy.kind = StrategyKind::Avalanche;

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert!(report.strategy_updated);
    let ops = store.ops();
    assert_eq!(ops.len(), 2);
    assert!(matches!(ops[0], StoreOp::GetStrategy { .. }));
    assert!(matches!(ops[1], StoreOp::CreateStrategy { .. }));

    let stored = store.stored_strategy().unwrap();
    assert_eq!(stored.kind, StrategyKind::Avalanche);
    assert!(stored.persisted_id().is_some());
}

#[tokio::test]
async fn test_changed_strategy_updated_by_server_id() {
    let store = Arc::new(MockDebtStore::new().with_strategy(DebtStrategy {
        id: Some("s1".into()),
        kind: StrategyKind::Snowball,
        ..Default::default()
    }));
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile {
        strategy: DebtStrategy {
            id: Some("s1".into()),
            kind: StrategyKind::Snowball,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut edited = original.clone();
    edited.strategy.kind = StrategyKind::Consolidation;
    edited.strategy.consolidation_plan = Some("Roll cards into one loan".into());

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert!(report.strategy_updated);
    let ops = store.ops();
    assert_eq!(ops.len(), 2);
    match &ops[1] {
        StoreOp::UpdateStrategy { id, strategy } => {
            assert_eq!(id, "s1");
            assert_eq!(strategy.kind, StrategyKind::Consolidation);
        }
        other => panic!("expected UpdateStrategy, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unchanged_strategy_is_never_fetched() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile::default();
    let edited = original.clone();

    sync.save_profile("user-1", &original, &edited).await.unwrap();
    assert!(store
        .ops()
        .iter()
        .all(|op| !matches!(op, StoreOp::GetStrategy { .. })));
}

#[tokio::test]
async fn test_strategy_create_conflict_retries_as_update() {
    let store = Arc::new(MockDebtStore::new().with_strategy_conflict("s9"));
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile::default();
    let mut edited = original.clone();
    edited.strategy.considering_bankruptcy = true;
    edited.strategy.bankruptcy_details = Some("Chapter 13 consult scheduled".into());

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert!(report.strategy_updated);
    let ops = store.ops();
    assert_eq!(ops.len(), 3);
    assert!(matches!(ops[0], StoreOp::GetStrategy { .. }));
    assert!(matches!(ops[1], StoreOp::CreateStrategy { .. }));
    match &ops[2] {
        StoreOp::UpdateStrategy { id, strategy } => {
            assert_eq!(id, "s9");
            assert!(strategy.considering_bankruptcy);
        }
        other => panic!("expected UpdateStrategy, got {:?}", other),
    }
}

// =============================================================================
// Failure surfacing
// =============================================================================

#[tokio::test]
async fn test_validation_failure_stops_save_before_any_call() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = DebtProfile::default();
    let mut edited = original.clone();
    edited.add(debt(None, "   ", DebtCategory::CreditCard, 100.0));

    let err = sync
        .save_profile("user-1", &original, &edited)
        .await
        .unwrap_err();

    assert!(matches!(err, SaveError::Validation(_)));
    assert_eq!(store.op_count(), 0);
}

#[tokio::test]
async fn test_every_category_failure_is_surfaced_not_just_the_first() {
    let store = Arc::new(
        MockDebtStore::new()
            .with_debt(debt(Some("m1"), "Chase", DebtCategory::Mortgage, 200_000.0))
            .with_debt(debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0))
            .with_debt(debt(Some("a1"), "Ally", DebtCategory::AutoLoan, 18_000.0))
            .with_failure("update_debt"),
    );
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![
        debt(Some("m1"), "Chase", DebtCategory::Mortgage, 200_000.0),
        debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0),
        debt(Some("a1"), "Ally", DebtCategory::AutoLoan, 18_000.0),
    ]);
    let mut edited = original.clone();
    edited.mortgages[0].current_balance = 199_000.0;
    edited.credit_cards[0].current_balance = 450.0;
    edited.auto_loans.clear();

    let err = sync
        .save_profile("user-1", &original, &edited)
        .await
        .unwrap_err();

    let SaveError::Incomplete { completed, failures } = err else {
        panic!("expected Incomplete");
    };

    let failed_slots: Vec<SaveSlot> = failures.iter().map(|f| f.slot).collect();
    assert_eq!(
        failed_slots,
        vec![
            SaveSlot::Category(DebtCategory::Mortgage),
            SaveSlot::Category(DebtCategory::CreditCard),
        ]
    );

    // The auto loan delete in its own category still went through.
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].category, DebtCategory::AutoLoan);
    assert_eq!(completed[0].deleted, 1);
    assert!(store
        .ops()
        .contains(&StoreOp::DeleteDebt { id: "a1".into() }));
}

#[tokio::test]
async fn test_strategy_failure_reported_alongside_category_failures() {
    let store = Arc::new(
        MockDebtStore::new()
            .with_debt(debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0))
            .with_failure("update_debt")
            .with_failure("get_strategy"),
    );
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![debt(
        Some("c1"),
        "Visa",
        DebtCategory::CreditCard,
        500.0,
    )]);
    let mut edited = original.clone();
    edited.credit_cards[0].current_balance = 450.0;
    edited.strategy.kind = StrategyKind::Avalanche;

    let err = sync
        .save_profile("user-1", &original, &edited)
        .await
        .unwrap_err();

    let SaveError::Incomplete { failures, .. } = err else {
        panic!("expected Incomplete");
    };
    let failed_slots: Vec<SaveSlot> = failures.iter().map(|f| f.slot).collect();
    assert_eq!(
        failed_slots,
        vec![
            SaveSlot::Category(DebtCategory::CreditCard),
            SaveSlot::Strategy,
        ]
    );
}

// =============================================================================
// Snapshot handling and reporting
// =============================================================================

#[tokio::test]
async fn test_caller_snapshots_are_never_mutated() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![debt(
        Some("c1"),
        "Visa",
        DebtCategory::CreditCard,
        500.0,
    )]);
    let mut edited = original.clone();
    edited.add(debt(Some("ghost"), "Discover", DebtCategory::CreditCard, 300.0));
    edited.strategy.kind = StrategyKind::Snowball;

    let original_before = original.clone();
    let edited_before = edited.clone();

    sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(original, original_before);
    assert_eq!(edited, edited_before);
}

#[tokio::test]
async fn test_report_counts_operations_per_category() {
    let store = Arc::new(
        MockDebtStore::new()
            .with_debt(debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0))
            .with_debt(debt(Some("c2"), "Amex", DebtCategory::CreditCard, 900.0)),
    );
    let sync = ProfileSync::new(store.clone());

    let original = profile_with(vec![
        debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0),
        debt(Some("c2"), "Amex", DebtCategory::CreditCard, 900.0),
    ]);
    let mut edited = original.clone();
    edited.credit_cards[0].current_balance = 400.0;
    edited.credit_cards.remove(1);
    edited.add(debt(None, "Discover", DebtCategory::CreditCard, 250.0));

    let report = sync.save_profile("user-1", &original, &edited).await.unwrap();

    assert_eq!(report.categories.len(), 1);
    let outcome = report.categories[0];
    assert_eq!(outcome.category, DebtCategory::CreditCard);
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.deleted, 1);
    assert_eq!(report.total_operations(), 3);
}

// =============================================================================
// Loading
// =============================================================================

#[tokio::test]
async fn test_load_profile_files_debts_into_their_categories() {
    let store = Arc::new(
        MockDebtStore::new()
            .with_debt(debt(Some("m1"), "Chase", DebtCategory::Mortgage, 200_000.0))
            .with_debt(debt(Some("c1"), "Visa", DebtCategory::CreditCard, 500.0))
            .with_strategy(DebtStrategy {
                id: Some("s1".into()),
                kind: StrategyKind::Avalanche,
                ..Default::default()
            }),
    );
    let sync = ProfileSync::new(store.clone());

    let profile = sync.load_profile("user-1").await.unwrap();

    assert_eq!(profile.mortgages.len(), 1);
    assert_eq!(profile.credit_cards.len(), 1);
    assert_eq!(profile.debt_count(), 2);
    assert_eq!(profile.strategy.kind, StrategyKind::Avalanche);
}

#[tokio::test]
async fn test_load_profile_defaults_strategy_when_absent() {
    let store = Arc::new(MockDebtStore::new());
    let sync = ProfileSync::new(store.clone());

    let profile = sync.load_profile("user-1").await.unwrap();

    assert_eq!(profile.debt_count(), 0);
    assert_eq!(profile.strategy, DebtStrategy::default());
}
