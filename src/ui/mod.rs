//! View models consumed by front-ends. They read store snapshots and turn user
//! intent into [`BudgetAction`](crate::core::store::BudgetAction)s.

pub mod expense_detail;
pub mod expense_form;
pub mod expense_list;

pub use expense_detail::{DetailField, ExpenseDetail};
pub use expense_form::{ExpenseField, ExpenseForm};
pub use expense_list::ExpenseList;
