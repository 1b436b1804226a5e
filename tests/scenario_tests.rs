mod common;

use common::fill_form;
use expense_core::{errors::FormError, BudgetApp};

#[test]
fn budget_ceiling_blocks_the_third_expense() {
    let mut app = BudgetApp::new(1000.0);

    fill_form(&mut app, "Coffee", "50", "food", "2024-03-01");
    app.submit_form().expect("coffee fits");
    assert_eq!(app.remaining_budget(), 950.0);

    fill_form(&mut app, "Rent", "900", "housing", "2024-03-02");
    app.submit_form().expect("rent fits");
    assert_eq!(app.remaining_budget(), 50.0);

    fill_form(&mut app, "Snack", "60", "food", "2024-03-03");
    let err = app.submit_form().expect_err("snack exceeds budget");
    assert!(matches!(err, FormError::BudgetExceeded { .. }));
    assert_eq!(app.form().error(), Some(&err));
    assert_eq!(app.state().expenses.len(), 2);
    assert_eq!(app.remaining_budget(), 50.0);
}

#[test]
fn lowering_an_edited_expense_at_the_ceiling_succeeds() {
    let mut app = BudgetApp::new(1000.0);
    fill_form(&mut app, "Coffee", "50", "food", "2024-03-01");
    app.submit_form().unwrap();
    fill_form(&mut app, "Rent", "900", "housing", "2024-03-02");
    app.submit_form().unwrap();

    let coffee = app.state().expenses[0].id;
    app.start_editing(coffee);
    {
        let form = app.form();
        assert_eq!(form.draft().expense_name, "Coffee");
        assert_eq!(form.draft().amount, Some(50.0));
        assert_eq!(form.previous_amount(), 50.0);
    }

    app.set_field(expense_core::ui::ExpenseField::Amount, "40");
    app.submit_form().expect("lower amount is accepted");

    assert_eq!(app.state().expenses[0].id, coffee);
    assert_eq!(app.state().expenses[0].amount, 40.0);
    assert_eq!(app.remaining_budget(), 60.0);
    assert!(app.state().editing_id.is_none());
}

#[test]
fn edit_increase_is_checked_against_the_delta_only() {
    let mut app = BudgetApp::new(100.0);
    fill_form(&mut app, "Dinner", "70", "food", "2024-03-01");
    app.submit_form().unwrap();
    let id = app.state().expenses[0].id;

    app.start_editing(id);
    app.set_field(expense_core::ui::ExpenseField::Amount, "100");
    app.submit_form().expect("delta of 30 equals remaining 30");
    assert_eq!(app.remaining_budget(), 0.0);

    app.start_editing(id);
    app.set_field(expense_core::ui::ExpenseField::Amount, "100.5");
    let err = app.submit_form().expect_err("delta of 0.5 exceeds remaining 0");
    assert!(matches!(err, FormError::BudgetExceeded { .. }));
    assert_eq!(app.state().expenses[0].amount, 100.0);
    assert!(app.form().is_editing());
}

#[test]
fn missing_fields_block_dispatch() {
    let mut app = BudgetApp::new(100.0);
    fill_form(&mut app, "Dinner", "", "food", "2024-03-01");
    assert_eq!(app.submit_form().unwrap_err(), FormError::IncompleteFields);
    assert!(app.state().expenses.is_empty());
}

#[test]
fn filtering_hides_other_categories_until_cleared() {
    let mut app = BudgetApp::new(500.0);
    fill_form(&mut app, "Coffee", "5", "food", "2024-03-01");
    app.submit_form().unwrap();
    fill_form(&mut app, "Rent", "300", "housing", "2024-03-01");
    app.submit_form().unwrap();

    app.filter(Some("health".into()));
    assert!(app.list().is_empty());
    assert_eq!(app.list().empty_message(), Some("No expenses yet"));

    app.filter(Some("food".into()));
    assert_eq!(app.list().len(), 1);

    app.filter(None);
    assert_eq!(app.list().len(), 2);
    assert_eq!(app.list().empty_message(), None);
}

#[test]
fn deleting_the_edit_target_resets_the_form() {
    let mut app = BudgetApp::new(100.0);
    fill_form(&mut app, "Taxi", "20", "leisure", "2024-03-01");
    app.submit_form().unwrap();
    let id = app.state().expenses[0].id;

    app.start_editing(id);
    assert!(app.form().is_editing());
    app.delete(id);

    assert!(app.state().editing_id.is_none());
    assert!(!app.form().is_editing());
    assert_eq!(app.form().draft().expense_name, "");
    assert_eq!(app.remaining_budget(), 100.0);
}

#[test]
fn spent_percentage_tracks_expenses() {
    let mut app = BudgetApp::new(200.0);
    assert_eq!(app.spent_percentage(), 0.0);
    fill_form(&mut app, "Shoes", "50", "miscellaneous", "2024-03-01");
    app.submit_form().unwrap();
    assert_eq!(app.spent_percentage(), 25.0);

    app.reset();
    assert_eq!(app.spent_percentage(), 0.0);
}
