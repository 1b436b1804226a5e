pub mod category;
pub mod common;
pub mod expense;

pub use category::{catalog, Category};
pub use common::Amounted;
pub use expense::{DraftExpense, Expense, ExpenseId, NewExpense};
