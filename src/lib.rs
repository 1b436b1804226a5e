#![doc(test(attr(deny(warnings))))]

//! Expense Core holds the state contract behind a small budgeting front-end:
//! a reducer-driven expense store, the derived remaining-budget figures, and
//! the view models (form, list, detail) that consume them.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ui;
pub mod utils;

pub use app::BudgetApp;
pub use crate::core::store::{BudgetAction, BudgetState, Store};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup log.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing using `filter` as the crate directive.
pub fn init_with_filter(filter: &str) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("Expense Core tracing initialized.");
    });
}
