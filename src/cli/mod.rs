//! Line-oriented shell over a [`BudgetApp`](crate::app::BudgetApp).

mod commands;
pub mod context;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
