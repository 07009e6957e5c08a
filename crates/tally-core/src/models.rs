//! Data models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lowercase a label and drop everything but letters and digits, so
/// "Food & Dining", "food-dining" and "FOOD_DINING" compare equal.
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Spending category
///
/// Stored as its display label. Text that doesn't match a known label
/// reads back as `Other`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Category; 7] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "fooddining" | "food" | "dining" => Ok(Self::FoodDining),
            "transportation" | "transport" => Ok(Self::Transportation),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            "billsutilities" | "bills" | "utilities" => Ok(Self::BillsUtilities),
            "healthcare" | "health" => Ok(Self::Healthcare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an expense was paid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Digital Wallet")]
    DigitalWallet,
    /// Stored text that isn't a known method
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl PaymentMethod {
    /// Methods a user can pick when recording an expense
    pub const SELECTABLE: [PaymentMethod; 4] = [
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::DigitalWallet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::DigitalWallet => "Digital Wallet",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "cash" => Ok(Self::Cash),
            "creditcard" | "credit" => Ok(Self::CreditCard),
            "debitcard" | "debit" => Ok(Self::DebitCard),
            "digitalwallet" | "wallet" => Ok(Self::DigitalWallet),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    /// Always positive
    pub amount: f64,
    pub category: Category,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// An expense as supplied by the caller, before validation and insertion
///
/// Fields are raw text; `Database::create_expense` validates them.
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub payment_method: String,
}

impl NewExpense {
    pub fn new(
        date: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount,
            category: category.into(),
            description: description.into(),
            payment_method: payment_method.into(),
        }
    }
}
