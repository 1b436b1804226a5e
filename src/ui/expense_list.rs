use crate::core::services::ExpenseService;
use crate::core::store::BudgetState;
use crate::domain::{category, Expense};

use super::expense_detail::ExpenseDetail;

pub const EMPTY_MESSAGE: &str = "No expenses yet";
pub const LIST_TITLE: &str = "Expense list";

/// Expenses to display for one snapshot, narrowed by the active category filter.
///
/// Built fresh from each snapshot; there is nothing to invalidate.
#[derive(Debug, Clone)]
pub struct ExpenseList<'a> {
    entries: Vec<&'a Expense>,
    category: Option<&'a str>,
}

impl<'a> ExpenseList<'a> {
    pub fn from_state(state: &'a BudgetState) -> Self {
        Self {
            entries: ExpenseService::filtered(state),
            category: state.current_category.as_deref(),
        }
    }

    pub fn entries(&self) -> &[&'a Expense] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message shown in place of the list when nothing matches.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }

    /// Heading, naming the filter category when one is active.
    pub fn title(&self) -> String {
        match self.category {
            Some(id) => {
                let name = category::find(id).map_or(id, |found| found.name.as_str());
                format!("{LIST_TITLE} ({name})")
            }
            None => LIST_TITLE.to_string(),
        }
    }

    pub fn details(&self) -> impl Iterator<Item = ExpenseDetail<'a>> + '_ {
        self.entries.iter().copied().map(ExpenseDetail::new)
    }
}
