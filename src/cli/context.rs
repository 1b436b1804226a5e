//! Shell state, command dispatch, and error reporting.

use strsim::levenshtein;
use thiserror::Error;

use crate::app::BudgetApp;
use crate::config::Config;
use crate::core::services::ExpenseService;
use crate::domain::ExpenseId;
use crate::errors::FormError;

use super::commands;
use super::output;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failures of a single shell command. None of them end the session.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("No expense matches `{0}`")]
    ExpenseNotFound(String),
    #[error("No budget set yet. Use `budget <amount>` first.")]
    BudgetNotSet,
    #[error("A budget of {0:.2} is already set. Use `reset` to start over.")]
    BudgetAlreadySet(f64),
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: BudgetApp,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, config: Config) -> Self {
        let registry = CommandRegistry::new(commands::definitions());
        let app = BudgetApp::new(config.starting_budget().unwrap_or(0.0));
        Self {
            mode,
            registry,
            app,
            config,
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let state = self.app.state();
        if !state.is_budget_set() {
            return "expense (no budget) > ".into();
        }
        let marker = if state.editing_id.is_some() {
            " [editing]"
        } else {
            ""
        };
        format!("expense {:.2} left{} > ", self.app.remaining_budget(), marker)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        handler(self, args)?;
        if self.running {
            Ok(LoopControl::Continue)
        } else {
            Ok(LoopControl::Exit)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        output::error(self.error_message(&err));
    }

    /// Script runs have no prompt echo, so errors name the line that failed.
    pub(crate) fn error_message(&self, err: &CommandError) -> String {
        match (self.mode, self.last_command.as_deref()) {
            (CliMode::Script, Some(line)) => format!("{} (while running `{}`)", err, line),
            _ => err.to_string(),
        }
    }

    pub(crate) fn require_budget(&self) -> CommandResult {
        if self.app.state().is_budget_set() {
            Ok(())
        } else {
            Err(CommandError::BudgetNotSet)
        }
    }

    /// Resolves a user-typed id prefix against the current expenses.
    pub(crate) fn resolve_expense(&self, prefix: &str) -> Result<ExpenseId, CommandError> {
        ExpenseService::by_prefix(self.app.state(), prefix)
            .map(|expense| expense.id)
            .ok_or_else(|| CommandError::ExpenseNotFound(prefix.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_reflects_budget_and_edit_state() {
        let mut context = ShellContext::new(CliMode::Script, Config::default());
        assert_eq!(context.prompt(), "expense (no budget) > ");
        context.app.set_budget(120.0);
        assert_eq!(context.prompt(), "expense 120.00 left > ");
    }

    #[test]
    fn unknown_commands_do_not_stop_the_shell() {
        let mut context = ShellContext::new(CliMode::Script, Config::default());
        let control = context.dispatch("lsit", "lsit", &[]).expect("dispatch");
        assert_eq!(control, LoopControl::Continue);
        assert!(context.running);
    }

    #[test]
    fn script_errors_name_the_failing_line() {
        let mut context = ShellContext::new(CliMode::Script, Config::default());
        context.last_command = Some("add Tea 3 food".into());
        assert_eq!(
            context.error_message(&CommandError::BudgetNotSet),
            "No budget set yet. Use `budget <amount>` first. (while running `add Tea 3 food`)"
        );

        context.mode = CliMode::Interactive;
        assert_eq!(
            context.error_message(&CommandError::BudgetNotSet),
            "No budget set yet. Use `budget <amount>` first."
        );
    }

    #[test]
    fn expense_commands_require_a_budget() {
        let context = ShellContext::new(CliMode::Script, Config::default());
        assert!(matches!(
            context.require_budget(),
            Err(CommandError::BudgetNotSet)
        ));
    }
}
