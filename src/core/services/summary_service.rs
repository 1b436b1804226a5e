//! Derived budget figures computed from a [`BudgetState`] snapshot.

use serde::Serialize;

use crate::core::store::BudgetState;
use crate::domain::Amounted;

/// Point-in-time budget figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub spent_percentage: f64,
}

/// Pure derivations over the store; nothing here is cached.
pub struct SummaryService;

impl SummaryService {
    pub fn total_spent(state: &BudgetState) -> f64 {
        state.expenses.iter().map(|expense| expense.amount()).sum()
    }

    /// Budget minus everything spent. May go negative if a caller skipped validation.
    pub fn remaining_budget(state: &BudgetState) -> f64 {
        state.budget - Self::total_spent(state)
    }

    /// Share of the budget already spent, rounded to two decimals.
    /// An unset budget yields `0.0` rather than dividing by zero.
    pub fn spent_percentage(state: &BudgetState) -> f64 {
        if state.budget <= 0.0 {
            return 0.0;
        }
        let raw = Self::total_spent(state) / state.budget * 100.0;
        (raw * 100.0).round() / 100.0
    }

    /// Percentage clamped to `0..=100` for progress indicators.
    pub fn progress(state: &BudgetState) -> f64 {
        Self::spent_percentage(state).clamp(0.0, 100.0)
    }

    pub fn summarize(state: &BudgetState) -> BudgetSummary {
        let spent = Self::total_spent(state);
        BudgetSummary {
            budget: state.budget,
            spent,
            remaining: state.budget - spent,
            spent_percentage: Self::spent_percentage(state),
        }
    }
}
