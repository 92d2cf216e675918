//! Transaction shapes as the backend sends them

use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::owner::Owner;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "INCOME"),
            TransactionType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// Transaction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: f64,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub id: i64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub owner: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring.unwrap_or(false)
    }

    /// Amount with expenses negative
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Fuel purchase with derived efficiency figures supplied by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub miles: f64,
    pub gallons: f64,
    pub mpg: f64,
    pub cost_per_mile: f64,
    pub cost_per_gallon: f64,
}

/// Income and expense totals for a list of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub count: usize,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl TransactionSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = TransactionSummary::default();
        for tx in transactions {
            summary.count += 1;
            match tx.kind {
                TransactionType::Income => summary.income += tx.amount,
                TransactionType::Expense => summary.expenses += tx.amount,
            }
        }
        summary.net = summary.income - summary.expenses;
        summary
    }
}

/// One item of the backend listing. Fuel purchases carry extra metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionRecord {
    Gas(GasTransaction),
    Plain(Transaction),
}

impl TransactionRecord {
    pub fn transaction(&self) -> &Transaction {
        match self {
            TransactionRecord::Gas(gas) => &gas.transaction,
            TransactionRecord::Plain(tx) => tx,
        }
    }

    pub fn gas(&self) -> Option<&GasTransaction> {
        match self {
            TransactionRecord::Gas(gas) => Some(gas),
            TransactionRecord::Plain(_) => None,
        }
    }
}

impl AsRef<Transaction> for Transaction {
    fn as_ref(&self) -> &Transaction {
        self
    }
}

impl AsRef<Transaction> for TransactionRecord {
    fn as_ref(&self) -> &Transaction {
        self.transaction()
    }
}

/// Keep transactions inside `range` that belong to `owner`, newest first
pub fn filter_transactions<T>(transactions: Vec<T>, range: &DateRange, owner: Owner) -> Vec<T>
where
    T: AsRef<Transaction>,
{
    let mut kept: Vec<T> = transactions
        .into_iter()
        .filter(|item| {
            let tx = item.as_ref();
            owner.matches(&tx.owner) && range.contains(&tx.date)
        })
        .collect();
    kept.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        b.date.cmp(&a.date).then(b.id.cmp(&a.id))
    });
    kept
}
