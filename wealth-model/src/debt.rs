//! Debt records and their category-specific details.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The six debt categories tracked by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    Mortgage,
    AutoLoan,
    StudentLoan,
    CreditCard,
    PersonalLoan,
    OtherDebt,
}

impl DebtCategory {
    /// Get the wire identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mortgage => "mortgage",
            Self::AutoLoan => "auto_loan",
            Self::StudentLoan => "student_loan",
            Self::CreditCard => "credit_card",
            Self::PersonalLoan => "personal_loan",
            Self::OtherDebt => "other_debt",
        }
    }

    /// All categories, in profile order.
    pub fn all() -> [Self; 6] {
        [
            Self::Mortgage,
            Self::AutoLoan,
            Self::StudentLoan,
            Self::CreditCard,
            Self::PersonalLoan,
            Self::OtherDebt,
        ]
    }
}

impl std::fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Current,
    PastDue,
    InGracePeriod,
    Delinquent,
    InCollection,
    #[serde(rename = "default")]
    Defaulted,
    PaidOff,
}

impl Default for DebtStatus {
    fn default() -> Self {
        Self::Current
    }
}

/// Category-specific extension fields.
///
/// The category tag rides along with the fields, so a serialized debt always
/// names the category it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum DebtDetails {
    Mortgage {
        /// Appraised value of the property securing the loan
        #[serde(default)]
        property_value: Option<f64>,
        /// Whether taxes and insurance are escrowed into the payment
        #[serde(default)]
        escrow_included: bool,
    },
    AutoLoan {
        /// Current value of the vehicle
        #[serde(default)]
        vehicle_value: Option<f64>,
    },
    StudentLoan {
        /// Loan servicer name
        #[serde(default)]
        servicer: Option<String>,
        /// Federal (vs. private) loan
        #[serde(default)]
        federal: bool,
    },
    CreditCard {
        /// Credit limit on the card
        #[serde(default)]
        credit_limit: Option<f64>,
    },
    PersonalLoan {
        /// What the loan was taken out for
        #[serde(default)]
        purpose: Option<String>,
    },
    OtherDebt {
        /// Free-form description of the obligation
        #[serde(default)]
        description: Option<String>,
    },
}

impl DebtDetails {
    /// Which category these details belong to.
    pub fn category(&self) -> DebtCategory {
        match self {
            Self::Mortgage { .. } => DebtCategory::Mortgage,
            Self::AutoLoan { .. } => DebtCategory::AutoLoan,
            Self::StudentLoan { .. } => DebtCategory::StudentLoan,
            Self::CreditCard { .. } => DebtCategory::CreditCard,
            Self::PersonalLoan { .. } => DebtCategory::PersonalLoan,
            Self::OtherDebt { .. } => DebtCategory::OtherDebt,
        }
    }

    /// Empty details for a category.
    pub fn empty(category: DebtCategory) -> Self {
        match category {
            DebtCategory::Mortgage => Self::Mortgage {
                property_value: None,
                escrow_included: false,
            },
            DebtCategory::AutoLoan => Self::AutoLoan { vehicle_value: None },
            DebtCategory::StudentLoan => Self::StudentLoan {
                servicer: None,
                federal: false,
            },
            DebtCategory::CreditCard => Self::CreditCard { credit_limit: None },
            DebtCategory::PersonalLoan => Self::PersonalLoan { purpose: None },
            DebtCategory::OtherDebt => Self::OtherDebt { description: None },
        }
    }
}

/// A single debt record.
///
/// `created_at` / `updated_at` are assigned server-side; they deserialize from
/// API responses but are never serialized, so change detection and writes are
/// insensitive to them by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Server-assigned identifier; absent until first persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Who the debt is owed to; required for save
    pub lender: String,
    pub current_balance: f64,
    pub monthly_payment: f64,
    /// Annual interest rate, percent
    pub interest_rate: f64,
    pub original_amount: f64,
    /// Original term in months
    pub original_term: u32,
    /// Remaining term in months
    pub remaining_term: u32,
    #[serde(default)]
    pub is_joint: bool,
    #[serde(default)]
    pub has_collateral: bool,
    #[serde(default)]
    pub has_cosigner: bool,
    #[serde(default)]
    pub status: DebtStatus,
    #[serde(flatten)]
    pub details: DebtDetails,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Debt {
    /// Create a debt with zeroed financials and `Current` status.
    pub fn new(lender: impl Into<String>, details: DebtDetails) -> Self {
        Self {
            id: None,
            lender: lender.into(),
            current_balance: 0.0,
            monthly_payment: 0.0,
            interest_rate: 0.0,
            original_amount: 0.0,
            original_term: 0,
            remaining_term: 0,
            is_joint: false,
            has_collateral: false,
            has_cosigner: false,
            status: DebtStatus::Current,
            details,
            created_at: None,
            updated_at: None,
        }
    }

    /// Which category this debt belongs to.
    pub fn category(&self) -> DebtCategory {
        self.details.category()
    }

    /// The server-assigned id, if this record has been persisted.
    ///
    /// An empty-string id counts as not persisted.
    pub fn persisted_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether this record exists server-side.
    pub fn is_persisted(&self) -> bool {
        self.persisted_id().is_some()
    }

    /// Check required fields and numeric bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lender.trim().is_empty() {
            return Err(ValidationError::MissingLender {
                category: self.category(),
            });
        }
        if self.current_balance < 0.0 {
            return Err(ValidationError::NegativeAmount {
                category: self.category(),
                field: "current_balance",
            });
        }
        if self.monthly_payment < 0.0 {
            return Err(ValidationError::NegativeAmount {
                category: self.category(),
                field: "monthly_payment",
            });
        }
        Ok(())
    }
}
