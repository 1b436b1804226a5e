//! Domain types representing committed and in-progress expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Amounted;
use crate::errors::FormError;

/// Maximum number of characters accepted for an expense name.
pub const MAX_NAME_LEN: usize = 60;

pub type ExpenseId = Uuid;

/// A committed spending record held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub expense_name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Commits `fields` under a freshly generated identifier.
    pub fn new(fields: NewExpense) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    /// Rebuilds an expense with a known identifier, used for in-place updates.
    pub fn with_id(id: ExpenseId, fields: NewExpense) -> Self {
        Self {
            id,
            expense_name: fields.expense_name,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
        }
    }

    /// Projects the expense back into an editable draft.
    pub fn to_draft(&self) -> DraftExpense {
        DraftExpense {
            expense_name: self.expense_name.clone(),
            amount: Some(self.amount),
            category: self.category.clone(),
            date: Some(self.date),
        }
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Complete expense fields without an identifier; the payload of an add.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub expense_name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        expense_name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            expense_name: expense_name.into(),
            amount,
            category: category.into(),
            date,
        }
    }
}

/// In-progress expense held by a form before it is committed.
///
/// Unset fields are `None` or empty strings, mirroring blank inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftExpense {
    pub expense_name: String,
    pub amount: Option<f64>,
    pub category: String,
    pub date: Option<NaiveDate>,
}

impl DraftExpense {
    /// Converts the draft into committable fields, or reports missing input.
    pub fn validate(&self) -> Result<NewExpense, FormError> {
        self.complete_fields().ok_or(FormError::IncompleteFields)
    }

    fn complete_fields(&self) -> Option<NewExpense> {
        let name = self.expense_name.trim();
        if name.is_empty() || self.category.trim().is_empty() {
            return None;
        }
        let amount = self.amount.filter(|value| value.is_finite() && *value > 0.0)?;
        let date = self.date?;
        Some(NewExpense::new(name, amount, self.category.trim(), date))
    }
}
