//! Session wiring: one [`Store`] with the expense form subscribed to it.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::core::services::{BudgetSummary, SummaryService};
use crate::core::store::{BudgetAction, BudgetState, SharedObserver, Store, SubscriptionId};
use crate::domain::ExpenseId;
use crate::errors::FormError;
use crate::ui::{ExpenseField, ExpenseForm, ExpenseList};

/// A budgeting session as a front-end sees it.
pub struct BudgetApp {
    store: Store,
    form: Rc<RefCell<ExpenseForm>>,
}

impl Default for BudgetApp {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl BudgetApp {
    /// Starts a session with `budget` as the ceiling; `0.0` leaves it unset.
    pub fn new(budget: f64) -> Self {
        let mut store = Store::new(budget);
        let form = Rc::new(RefCell::new(ExpenseForm::new()));
        store.subscribe(form.clone());
        Self { store, form }
    }

    pub fn state(&self) -> &BudgetState {
        self.store.state()
    }

    pub fn subscribe(&mut self, observer: SharedObserver) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn dispatch(&mut self, action: BudgetAction) -> &BudgetState {
        self.store.dispatch(action)
    }

    pub fn form(&self) -> Ref<'_, ExpenseForm> {
        self.form.borrow()
    }

    pub fn set_field(&mut self, field: ExpenseField, raw: &str) {
        self.form.borrow_mut().set_field(field, raw);
    }

    /// Validates the form and dispatches the resulting add or update.
    pub fn submit_form(&mut self) -> Result<&BudgetState, FormError> {
        let action = self.form.borrow_mut().submit(self.store.state())?;
        Ok(self.store.dispatch(action))
    }

    /// Supplies the budget during setup; a no-op once a budget is set.
    pub fn set_budget(&mut self, budget: f64) -> &BudgetState {
        self.dispatch(BudgetAction::AddBudget { budget })
    }

    pub fn start_editing(&mut self, id: ExpenseId) -> &BudgetState {
        self.dispatch(BudgetAction::GetExpenseById { id })
    }

    pub fn cancel_editing(&mut self) -> &BudgetState {
        self.dispatch(BudgetAction::RemoveEditingId)
    }

    pub fn delete(&mut self, id: ExpenseId) -> &BudgetState {
        self.dispatch(BudgetAction::DeleteExpense { id })
    }

    pub fn filter(&mut self, category: Option<String>) -> &BudgetState {
        self.dispatch(BudgetAction::AddFilterCategory { id: category })
    }

    /// Clears the session; the budget must be entered again afterwards.
    pub fn reset(&mut self) -> &BudgetState {
        self.form.borrow_mut().reset();
        self.dispatch(BudgetAction::ResetApp)
    }

    pub fn list(&self) -> ExpenseList<'_> {
        ExpenseList::from_state(self.store.state())
    }

    pub fn remaining_budget(&self) -> f64 {
        SummaryService::remaining_budget(self.store.state())
    }

    pub fn spent_percentage(&self) -> f64 {
        SummaryService::spent_percentage(self.store.state())
    }

    pub fn summary(&self) -> BudgetSummary {
        SummaryService::summarize(self.store.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(app: &mut BudgetApp, name: &str, amount: &str, category: &str) {
        app.set_field(ExpenseField::Name, name);
        app.set_field(ExpenseField::Amount, amount);
        app.set_field(ExpenseField::Category, category);
        app.set_field(ExpenseField::Date, "2024-07-01");
    }

    #[test]
    fn selecting_for_edit_hydrates_form_through_subscription() {
        let mut app = BudgetApp::new(100.0);
        fill(&mut app, "Books", "20", "leisure");
        app.submit_form().expect("add");
        let id = app.state().expenses[0].id;

        app.start_editing(id);
        assert_eq!(app.form().draft().expense_name, "Books");
        assert_eq!(app.form().previous_amount(), 20.0);

        app.set_field(ExpenseField::Name, "Comics");
        app.submit_form().expect("update");
        assert_eq!(app.state().expenses[0].expense_name, "Comics");
        assert!(app.state().editing_id.is_none());
        assert!(!app.form().is_editing());
    }

    #[test]
    fn reset_requires_new_budget() {
        let mut app = BudgetApp::new(100.0);
        fill(&mut app, "Books", "20", "leisure");
        app.submit_form().expect("add");
        app.reset();
        assert!(!app.state().is_budget_set());
        assert!(app.list().is_empty());

        app.set_budget(80.0);
        assert_eq!(app.remaining_budget(), 80.0);
    }

    #[test]
    fn budget_cannot_be_rewritten_below_spending() {
        let mut app = BudgetApp::new(1000.0);
        fill(&mut app, "Rent", "900", "housing");
        app.submit_form().expect("add");

        app.set_budget(100.0);
        assert_eq!(app.state().budget, 1000.0);
        assert_eq!(app.remaining_budget(), 100.0);
    }
}
