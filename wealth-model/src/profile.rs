//! The per-user debt profile aggregate and its read-side folds.

use serde::{Deserialize, Serialize};

use crate::debt::{Debt, DebtCategory};
use crate::error::ValidationError;
use crate::strategy::DebtStrategy;

/// A user's complete debt picture: six category sequences plus one strategy
/// record.
///
/// The authoritative copy lives server-side. Instances of this type are
/// point-in-time snapshots: either "original" (last loaded) or "edited"
/// (after local changes), and the sync layer treats both as read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtProfile {
    #[serde(default)]
    pub mortgages: Vec<Debt>,
    #[serde(default)]
    pub auto_loans: Vec<Debt>,
    #[serde(default)]
    pub student_loans: Vec<Debt>,
    #[serde(default)]
    pub credit_cards: Vec<Debt>,
    #[serde(default)]
    pub personal_loans: Vec<Debt>,
    #[serde(default)]
    pub other_debts: Vec<Debt>,
    #[serde(default)]
    pub strategy: DebtStrategy,
}

impl DebtProfile {
    /// The debts in one category.
    pub fn category(&self, category: DebtCategory) -> &[Debt] {
        match category {
            DebtCategory::Mortgage => &self.mortgages,
            DebtCategory::AutoLoan => &self.auto_loans,
            DebtCategory::StudentLoan => &self.student_loans,
            DebtCategory::CreditCard => &self.credit_cards,
            DebtCategory::PersonalLoan => &self.personal_loans,
            DebtCategory::OtherDebt => &self.other_debts,
        }
    }

    /// Mutable access to one category's debts.
    pub fn category_mut(&mut self, category: DebtCategory) -> &mut Vec<Debt> {
        match category {
            DebtCategory::Mortgage => &mut self.mortgages,
            DebtCategory::AutoLoan => &mut self.auto_loans,
            DebtCategory::StudentLoan => &mut self.student_loans,
            DebtCategory::CreditCard => &mut self.credit_cards,
            DebtCategory::PersonalLoan => &mut self.personal_loans,
            DebtCategory::OtherDebt => &mut self.other_debts,
        }
    }

    /// File a debt into the category its details name.
    pub fn add(&mut self, debt: Debt) {
        self.category_mut(debt.category()).push(debt);
    }

    /// Iterate over every debt across all six categories.
    pub fn iter_all(&self) -> impl Iterator<Item = &Debt> {
        DebtCategory::all()
            .into_iter()
            .flat_map(|c| self.category(c).iter())
    }

    /// Total number of debts across all categories.
    pub fn debt_count(&self) -> usize {
        self.iter_all().count()
    }

    /// Validate every member debt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for debt in self.iter_all() {
            debt.validate()?;
        }
        Ok(())
    }

    // ==================== Read-side aggregates ====================

    /// Sum of all current balances.
    pub fn total_debt(&self) -> f64 {
        self.iter_all().map(|d| d.current_balance).sum()
    }

    /// Sum of all monthly payments.
    pub fn total_monthly_payment(&self) -> f64 {
        self.iter_all().map(|d| d.monthly_payment).sum()
    }

    /// Balance-weighted average interest rate, or 0.0 when there is no
    /// balance to weight.
    pub fn average_interest_rate(&self) -> f64 {
        let total = self.total_debt();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .iter_all()
            .map(|d| d.interest_rate * d.current_balance)
            .sum();
        weighted / total
    }

    /// The debt with the highest interest rate.
    pub fn highest_interest_debt(&self) -> Option<&Debt> {
        self.iter_all()
            .max_by(|a, b| a.interest_rate.total_cmp(&b.interest_rate))
    }

    /// The debt with the lowest interest rate.
    pub fn lowest_interest_debt(&self) -> Option<&Debt> {
        self.iter_all()
            .min_by(|a, b| a.interest_rate.total_cmp(&b.interest_rate))
    }

    /// The debt with the highest monthly payment.
    pub fn highest_payment_debt(&self) -> Option<&Debt> {
        self.iter_all()
            .max_by(|a, b| a.monthly_payment.total_cmp(&b.monthly_payment))
    }

    /// The debt with the lowest monthly payment.
    pub fn lowest_payment_debt(&self) -> Option<&Debt> {
        self.iter_all()
            .min_by(|a, b| a.monthly_payment.total_cmp(&b.monthly_payment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::DebtDetails;

    fn debt(lender: &str, category: DebtCategory, balance: f64, payment: f64, rate: f64) -> Debt {
        let mut d = Debt::new(lender, DebtDetails::empty(category));
        d.current_balance = balance;
        d.monthly_payment = payment;
        d.interest_rate = rate;
        d
    }

    #[test]
    fn test_empty_profile_aggregates_are_zero() {
        let profile = DebtProfile::default();
        assert_eq!(profile.total_debt(), 0.0);
        assert_eq!(profile.total_monthly_payment(), 0.0);
        assert_eq!(profile.average_interest_rate(), 0.0);
        assert!(profile.highest_interest_debt().is_none());
        assert!(profile.lowest_payment_debt().is_none());
    }

    #[test]
    fn test_totals_span_all_categories() {
        let mut profile = DebtProfile::default();
        profile.add(debt("Chase", DebtCategory::Mortgage, 200_000.0, 1_500.0, 6.0));
        profile.add(debt("Visa", DebtCategory::CreditCard, 2_000.0, 100.0, 22.0));
        profile.add(debt("Ally", DebtCategory::AutoLoan, 18_000.0, 400.0, 7.5));

        assert_eq!(profile.debt_count(), 3);
        assert_eq!(profile.total_debt(), 220_000.0);
        assert_eq!(profile.total_monthly_payment(), 2_000.0);
    }

    #[test]
    fn test_average_rate_is_balance_weighted() {
        let mut profile = DebtProfile::default();
        profile.add(debt("A", DebtCategory::CreditCard, 1_000.0, 50.0, 20.0));
        profile.add(debt("B", DebtCategory::PersonalLoan, 3_000.0, 100.0, 10.0));

        // (20 * 1000 + 10 * 3000) / 4000 = 12.5
        assert!((profile.average_interest_rate() - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_balance_profile_has_zero_average_rate() {
        let mut profile = DebtProfile::default();
        profile.add(debt("A", DebtCategory::CreditCard, 0.0, 0.0, 20.0));
        assert_eq!(profile.average_interest_rate(), 0.0);
    }

    #[test]
    fn test_rate_and_payment_extremes() {
        let mut profile = DebtProfile::default();
        profile.add(debt("Low", DebtCategory::Mortgage, 100_000.0, 900.0, 4.0));
        profile.add(debt("High", DebtCategory::CreditCard, 500.0, 40.0, 27.0));

        assert_eq!(profile.highest_interest_debt().unwrap().lender, "High");
        assert_eq!(profile.lowest_interest_debt().unwrap().lender, "Low");
        assert_eq!(profile.highest_payment_debt().unwrap().lender, "Low");
        assert_eq!(profile.lowest_payment_debt().unwrap().lender, "High");
    }

    #[test]
    fn test_validate_surfaces_member_errors() {
        let mut profile = DebtProfile::default();
        profile.add(debt("", DebtCategory::CreditCard, 100.0, 10.0, 20.0));
        assert!(profile.validate().is_err());
    }
}
