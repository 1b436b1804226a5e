#![allow(dead_code)]

use chrono::NaiveDate;
use expense_core::{domain::NewExpense, ui::ExpenseField, BudgetApp};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).expect("valid day")
}

pub fn expense(name: &str, amount: f64, category: &str) -> NewExpense {
    NewExpense::new(name, amount, category, day(1))
}

/// Fills every form field the way a user typing into the inputs would.
pub fn fill_form(app: &mut BudgetApp, name: &str, amount: &str, category: &str, date: &str) {
    app.set_field(ExpenseField::Name, name);
    app.set_field(ExpenseField::Amount, amount);
    app.set_field(ExpenseField::Category, category);
    app.set_field(ExpenseField::Date, date);
}
