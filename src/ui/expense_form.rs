//! Expense form: a local draft plus the validation gate in front of the store.
//!
//! The form never dispatches on its own. [`ExpenseForm::submit`] checks the
//! draft against the current snapshot and hands back the action the caller
//! should dispatch. Edit hydration arrives through [`StoreObserver`].

use std::fmt;

use chrono::NaiveDate;
use tracing::info;

use crate::core::services::SummaryService;
use crate::core::store::{BudgetAction, BudgetState, StoreObserver};
use crate::domain::expense::MAX_NAME_LEN;
use crate::domain::{category, DraftExpense, Expense, ExpenseId};
use crate::errors::FormError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input fields exposed by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Name,
    Amount,
    Category,
    Date,
}

impl ExpenseField {
    pub const ALL: [ExpenseField; 4] = [
        ExpenseField::Name,
        ExpenseField::Amount,
        ExpenseField::Category,
        ExpenseField::Date,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ExpenseField::Name => "name",
            ExpenseField::Amount => "amount",
            ExpenseField::Category => "category",
            ExpenseField::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExpenseField::Name => "Expense name",
            ExpenseField::Amount => "Amount",
            ExpenseField::Category => "Category",
            ExpenseField::Date => "Expense date",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalized)
    }
}

impl fmt::Display for ExpenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Local form state: the draft, the amount it replaces when editing, and the
/// last validation error.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    draft: DraftExpense,
    previous_amount: f64,
    editing_id: Option<ExpenseId>,
    error: Option<FormError>,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &DraftExpense {
        &self.draft
    }

    /// Amount of the expense being edited before this edit; zero for new expenses.
    pub fn previous_amount(&self) -> f64 {
        self.previous_amount
    }

    pub fn editing_id(&self) -> Option<ExpenseId> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Title shown above the form.
    pub fn legend(&self) -> &'static str {
        if self.is_editing() {
            "Save changes"
        } else {
            "New expense"
        }
    }

    /// Applies raw text input to a field the way a browser input would:
    /// unparseable amounts, dates, or unknown categories leave the field unset.
    pub fn set_field(&mut self, field: ExpenseField, raw: &str) {
        match field {
            ExpenseField::Name => self.set_name(raw),
            ExpenseField::Amount => self.set_amount(raw.trim().parse::<f64>().ok()),
            ExpenseField::Category => self.set_category(raw),
            ExpenseField::Date => {
                self.set_date(NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok())
            }
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.expense_name = name.chars().take(MAX_NAME_LEN).collect();
        self.error = None;
    }

    pub fn set_amount(&mut self, amount: Option<f64>) {
        self.draft.amount = amount.filter(|value| value.is_finite());
        self.error = None;
    }

    pub fn set_category(&mut self, id: &str) {
        self.draft.category = category::find(id.trim())
            .map(|found| found.id.clone())
            .unwrap_or_default();
        self.error = None;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
        self.error = None;
    }

    /// Validates the draft against `state` and returns the action to dispatch.
    ///
    /// On success the draft returns to its empty default. On failure the
    /// error is kept for display and the draft is left untouched.
    pub fn submit(&mut self, state: &BudgetState) -> Result<BudgetAction, FormError> {
        match self.check(state) {
            Ok(action) => {
                info!(action = action.name(), "expense form submitted");
                self.reset();
                Ok(action)
            }
            Err(err) => {
                info!(kind = err.kind(), "expense form rejected submission");
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn check(&self, state: &BudgetState) -> Result<BudgetAction, FormError> {
        let fields = self.draft.validate()?;

        let remaining = SummaryService::remaining_budget(state);
        let delta = fields.amount - self.previous_amount;
        if delta > remaining {
            return Err(FormError::BudgetExceeded {
                requested: delta,
                remaining,
            });
        }

        Ok(match state.editing_id {
            Some(id) => BudgetAction::UpdateExpense {
                expense: Expense::with_id(id, fields),
            },
            None => BudgetAction::AddExpense { expense: fields },
        })
    }

    /// Copies `expense` into the draft and remembers its amount.
    pub fn hydrate(&mut self, expense: &Expense) {
        self.draft = expense.to_draft();
        self.previous_amount = expense.amount;
        self.editing_id = Some(expense.id);
        self.error = None;
    }

    /// Returns the form to an empty, non-editing draft.
    pub fn reset(&mut self) {
        self.draft = DraftExpense::default();
        self.previous_amount = 0.0;
        self.editing_id = None;
        self.error = None;
    }
}

impl StoreObserver for ExpenseForm {
    fn state_changed(&mut self, previous: &BudgetState, current: &BudgetState) {
        if previous.editing_id == current.editing_id {
            return;
        }
        match current.editing_expense() {
            Some(expense) => self.hydrate(expense),
            // Edit was cancelled or its target deleted.
            None if self.editing_id.is_some() => self.reset(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::reduce;
    use crate::domain::NewExpense;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn fill(form: &mut ExpenseForm, name: &str, amount: &str, category: &str) {
        form.set_field(ExpenseField::Name, name);
        form.set_field(ExpenseField::Amount, amount);
        form.set_field(ExpenseField::Category, category);
        form.set_field(ExpenseField::Date, "2024-06-01");
    }

    #[test]
    fn field_keys_round_trip() {
        for field in ExpenseField::ALL {
            assert_eq!(ExpenseField::from_key(field.key()), Some(field));
        }
        assert_eq!(ExpenseField::from_key(" Amount "), Some(ExpenseField::Amount));
        assert!(ExpenseField::from_key("memo").is_none());
    }

    #[test]
    fn raw_input_is_parsed_like_browser_fields() {
        let mut form = ExpenseForm::new();
        form.set_field(ExpenseField::Name, &"x".repeat(80));
        form.set_field(ExpenseField::Amount, "12,5");
        form.set_field(ExpenseField::Category, "groceries");
        form.set_field(ExpenseField::Date, "01/06/2024");

        assert_eq!(form.draft().expense_name.chars().count(), MAX_NAME_LEN);
        assert_eq!(form.draft().amount, None);
        assert_eq!(form.draft().category, "");
        assert_eq!(form.draft().date, None);
    }

    #[test]
    fn incomplete_draft_is_rejected_and_kept() {
        let state = BudgetState::new(100.0);
        let mut form = ExpenseForm::new();
        form.set_field(ExpenseField::Name, "Lunch");

        let err = form.submit(&state).expect_err("missing fields");
        assert_eq!(err, FormError::IncompleteFields);
        assert_eq!(form.error(), Some(&FormError::IncompleteFields));
        assert_eq!(form.draft().expense_name, "Lunch");

        form.set_field(ExpenseField::Amount, "9");
        assert!(form.error().is_none());
    }

    #[test]
    fn new_expense_becomes_add_action_and_resets_draft() {
        let state = BudgetState::new(100.0);
        let mut form = ExpenseForm::new();
        fill(&mut form, "Lunch", "12.5", "food");

        let action = form.submit(&state).expect("valid submission");
        assert_eq!(
            action,
            BudgetAction::AddExpense {
                expense: NewExpense::new("Lunch", 12.5, "food", day()),
            }
        );
        assert_eq!(form.draft(), &DraftExpense::default());
        assert_eq!(form.previous_amount(), 0.0);
    }

    #[test]
    fn amount_over_remaining_budget_is_rejected() {
        let state = BudgetState::new(10.0);
        let mut form = ExpenseForm::new();
        fill(&mut form, "Dinner", "10.01", "food");

        let err = form.submit(&state).expect_err("over budget");
        assert!(matches!(err, FormError::BudgetExceeded { remaining, .. } if remaining == 10.0));
    }

    #[test]
    fn observer_hydrates_and_cancels_edits() {
        let state = reduce(
            &BudgetState::new(100.0),
            BudgetAction::AddExpense {
                expense: NewExpense::new("Taxi", 30.0, "leisure", day()),
            },
        );
        let id = state.expenses[0].id;
        let editing = reduce(&state, BudgetAction::GetExpenseById { id });

        let mut form = ExpenseForm::new();
        form.state_changed(&state, &editing);
        assert_eq!(form.editing_id(), Some(id));
        assert_eq!(form.previous_amount(), 30.0);
        assert_eq!(form.draft().expense_name, "Taxi");
        assert_eq!(form.legend(), "Save changes");

        let cancelled = reduce(&editing, BudgetAction::RemoveEditingId);
        form.state_changed(&editing, &cancelled);
        assert!(!form.is_editing());
        assert_eq!(form.draft(), &DraftExpense::default());
    }

    #[test]
    fn editing_submits_update_with_same_id() {
        let state = reduce(
            &BudgetState::new(30.0),
            BudgetAction::AddExpense {
                expense: NewExpense::new("Taxi", 30.0, "leisure", day()),
            },
        );
        let id = state.expenses[0].id;
        let editing = reduce(&state, BudgetAction::GetExpenseById { id });
        let mut form = ExpenseForm::new();
        form.state_changed(&state, &editing);

        form.set_field(ExpenseField::Amount, "25");
        let action = form.submit(&editing).expect("lower amount fits");
        match action {
            BudgetAction::UpdateExpense { expense } => {
                assert_eq!(expense.id, id);
                assert_eq!(expense.amount, 25.0);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
