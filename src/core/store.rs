//! Reducer-driven expense store.
//!
//! [`reduce`] is the pure transition function: it never fails and never mutates
//! its input. [`Store`] owns the current snapshot, applies dispatched actions in
//! order, and notifies subscribed [`StoreObserver`]s after every change.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{Expense, ExpenseId, NewExpense};

/// Root aggregate of the budgeting session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    pub budget: f64,
    pub expenses: Vec<Expense>,
    pub editing_id: Option<ExpenseId>,
    pub current_category: Option<String>,
}

impl BudgetState {
    pub fn new(budget: f64) -> Self {
        Self {
            budget: sanitize_budget(budget).unwrap_or(0.0),
            ..Self::default()
        }
    }

    /// A budget of zero means setup has not happened yet (or the app was reset).
    pub fn is_budget_set(&self) -> bool {
        self.budget > 0.0
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Resolves `editing_id` against the live collection.
    pub fn editing_expense(&self) -> Option<&Expense> {
        self.editing_id.and_then(|id| self.expense(id))
    }
}

/// Every transition the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetAction {
    /// Sets the budget ceiling during setup. Ignored once a budget is set;
    /// only [`BudgetAction::ResetApp`] unsets it again.
    AddBudget { budget: f64 },
    AddExpense { expense: NewExpense },
    /// Replaces the expense with the same id and ends the edit.
    UpdateExpense { expense: Expense },
    DeleteExpense { id: ExpenseId },
    /// Marks an expense as the edit target.
    GetExpenseById { id: ExpenseId },
    RemoveEditingId,
    /// Sets the category filter; `None` clears it.
    AddFilterCategory { id: Option<String> },
    /// Clears expenses, filter and edit target, and unsets the budget.
    ResetApp,
}

impl BudgetAction {
    /// Stable kebab-case name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            BudgetAction::AddBudget { .. } => "add-budget",
            BudgetAction::AddExpense { .. } => "add-expense",
            BudgetAction::UpdateExpense { .. } => "update-expense",
            BudgetAction::DeleteExpense { .. } => "delete-expense",
            BudgetAction::GetExpenseById { .. } => "get-expense-by-id",
            BudgetAction::RemoveEditingId => "remove-editing-id",
            BudgetAction::AddFilterCategory { .. } => "add-filter-category",
            BudgetAction::ResetApp => "reset-app",
        }
    }
}

impl fmt::Display for BudgetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sanitize_budget(budget: f64) -> Option<f64> {
    (budget.is_finite() && budget >= 0.0).then_some(budget)
}

/// Computes the snapshot that follows `state` once `action` is applied.
pub fn reduce(state: &BudgetState, action: BudgetAction) -> BudgetState {
    let mut next = state.clone();
    match action {
        BudgetAction::AddBudget { budget } => {
            if !next.is_budget_set() {
                next.budget = sanitize_budget(budget).unwrap_or(next.budget);
            }
        }
        BudgetAction::AddExpense { expense } => {
            next.expenses.push(Expense::new(expense));
        }
        BudgetAction::UpdateExpense { expense } => {
            if let Some(slot) = next.expenses.iter_mut().find(|e| e.id == expense.id) {
                *slot = expense;
                next.editing_id = None;
            }
        }
        BudgetAction::DeleteExpense { id } => {
            next.expenses.retain(|expense| expense.id != id);
            if next.editing_id == Some(id) {
                next.editing_id = None;
            }
        }
        BudgetAction::GetExpenseById { id } => {
            if next.expense(id).is_some() {
                next.editing_id = Some(id);
            }
        }
        BudgetAction::RemoveEditingId => {
            next.editing_id = None;
        }
        BudgetAction::AddFilterCategory { id } => {
            next.current_category = id.filter(|value| !value.is_empty());
        }
        BudgetAction::ResetApp => {
            next = BudgetState::default();
        }
    }
    next
}

/// Receives every committed transition of a [`Store`].
pub trait StoreObserver {
    fn state_changed(&mut self, previous: &BudgetState, current: &BudgetState);
}

impl<F> StoreObserver for F
where
    F: FnMut(&BudgetState, &BudgetState),
{
    fn state_changed(&mut self, previous: &BudgetState, current: &BudgetState) {
        self(previous, current)
    }
}

pub type SharedObserver = Rc<RefCell<dyn StoreObserver>>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the current [`BudgetState`] and applies dispatched actions in order.
pub struct Store {
    state: BudgetState,
    observers: Vec<(SubscriptionId, SharedObserver)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_state(BudgetState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Store {
    pub fn new(budget: f64) -> Self {
        Self::with_state(BudgetState::new(budget))
    }

    pub fn with_state(state: BudgetState) -> Self {
        Self {
            state,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Applies `action` and returns the new snapshot. Observers are only
    /// notified when the snapshot actually changed.
    pub fn dispatch(&mut self, action: BudgetAction) -> &BudgetState {
        let name = action.name();
        let next = reduce(&self.state, action);
        if next == self.state {
            debug!(action = name, "action left state unchanged");
            return &self.state;
        }
        let previous = std::mem::replace(&mut self.state, next);
        debug!(
            action = name,
            expenses = self.state.expenses.len(),
            editing = self.state.editing_id.is_some(),
            "dispatched action"
        );
        self.notify(&previous);
        &self.state
    }

    pub fn subscribe(&mut self, observer: SharedObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn notify(&self, previous: &BudgetState) {
        for (id, observer) in &self.observers {
            match observer.try_borrow_mut() {
                Ok(mut observer) => observer.state_changed(previous, &self.state),
                Err(_) => warn!(?id, "observer busy during dispatch; skipped notification"),
            }
        }
    }
}
