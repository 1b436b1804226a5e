//! Read-side lookups consumers perform against the live expense collection.

use crate::core::store::BudgetState;
use crate::domain::Expense;

pub struct ExpenseService;

impl ExpenseService {
    /// Expenses matching the active category filter, in insertion order.
    pub fn filtered(state: &BudgetState) -> Vec<&Expense> {
        match state.current_category.as_deref() {
            Some(category) => state
                .expenses
                .iter()
                .filter(|expense| expense.category == category)
                .collect(),
            None => state.expenses.iter().collect(),
        }
    }

    /// Finds an expense by a displayed id prefix, as typed by a user.
    pub fn by_prefix<'a>(state: &'a BudgetState, prefix: &str) -> Option<&'a Expense> {
        let needle = prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = state
            .expenses
            .iter()
            .filter(|expense| expense.id.simple().to_string().starts_with(&needle));
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }
}
