//! Shell command definitions and handlers.

use chrono::Local;

use crate::domain::{catalog, category};
use crate::ui::{ExpenseDetail, ExpenseField};

use super::context::{CommandError, CommandResult, ShellContext};
use super::output;
use super::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("budget", "budget <amount>", "Set the budget ceiling", cmd_budget),
        CommandEntry::new(
            "add",
            "add <name> <amount> <category> [YYYY-MM-DD]",
            "Add an expense in one step",
            cmd_add,
        ),
        CommandEntry::new(
            "set",
            "set <name|amount|category|date> <value>",
            "Change a field of the expense form",
            cmd_set,
        ),
        CommandEntry::new("save", "save", "Submit the expense form", cmd_save),
        CommandEntry::new("form", "form", "Show the expense form draft", cmd_form),
        CommandEntry::new("edit", "edit <id>", "Load an expense into the form", cmd_edit),
        CommandEntry::new("cancel", "cancel", "Abandon the current edit", cmd_cancel),
        CommandEntry::new("delete", "delete <id>", "Delete an expense", cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "filter",
            "filter [category]",
            "Show only one category (no argument clears)",
            cmd_filter,
        ),
        CommandEntry::new("list", "list", "List expenses", cmd_list).with_aliases(&["ls"]),
        CommandEntry::new("show", "show <id>", "Show one expense", cmd_show),
        CommandEntry::new("summary", "summary", "Show budget, spent and remaining", cmd_summary),
        CommandEntry::new("categories", "categories", "List expense categories", cmd_categories),
        CommandEntry::new("reset", "reset", "Clear expenses and budget", cmd_reset),
        CommandEntry::new("help", "help", "Show available commands", cmd_help),
        CommandEntry::new("exit", "exit", "Leave the shell", cmd_exit)
            .with_aliases(&["quit"]),
    ]
}

fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not a positive amount", raw))
        })
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: budget <amount>".into()));
    };
    if context.app.state().is_budget_set() {
        return Err(CommandError::BudgetAlreadySet(context.app.state().budget));
    }
    let budget = parse_amount(raw)?;
    context.app.set_budget(budget);
    output::success(format!("Budget set to {:.2}.", budget));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.require_budget()?;
    if !(3..=4).contains(&args.len()) {
        return Err(CommandError::InvalidArguments(
            "usage: add <name> <amount> <category> [YYYY-MM-DD]".into(),
        ));
    }
    if context.app.state().editing_id.is_some() {
        return Err(CommandError::InvalidArguments(
            "finish or `cancel` the current edit before adding".into(),
        ));
    }
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date = args.get(3).copied().unwrap_or(today.as_str());

    context.app.set_field(ExpenseField::Name, args[0]);
    context.app.set_field(ExpenseField::Amount, args[1]);
    context.app.set_field(ExpenseField::Category, args[2]);
    context.app.set_field(ExpenseField::Date, date);
    cmd_save(context, &[])
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [key, values @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: set <name|amount|category|date> <value>".into(),
        ));
    };
    let field = ExpenseField::from_key(key)
        .ok_or_else(|| CommandError::InvalidArguments(format!("unknown field `{}`", key)))?;
    context.app.set_field(field, &values.join(" "));
    print_form(context);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.require_budget()?;
    let updating = context.app.state().editing_id.is_some();
    context.app.submit_form()?;
    if updating {
        output::success("Expense updated.");
    } else {
        output::success("Expense added.");
    }
    output::info(format!("Remaining budget: {:.2}", context.app.remaining_budget()));
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_form(context);
    Ok(())
}

fn print_form(context: &ShellContext) {
    let form = context.app.form();
    let draft = form.draft();
    output::section(form.legend());
    for field in ExpenseField::ALL {
        let value = match field {
            ExpenseField::Name => draft.expense_name.clone(),
            ExpenseField::Amount => draft.amount.map(|v| format!("{:.2}", v)).unwrap_or_default(),
            ExpenseField::Category => category::find(&draft.category)
                .map(|found| found.name.clone())
                .unwrap_or_default(),
            ExpenseField::Date => draft
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        };
        output::plain(format!("  {:<12} {}", field.label(), value));
    }
    if let Some(err) = form.error() {
        output::warning(err);
    }
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::InvalidArguments("usage: edit <id>".into()));
    };
    let id = context.resolve_expense(prefix)?;
    context.app.start_editing(id);
    print_form(context);
    output::info("Change fields with `set`, then `save` or `cancel`.");
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.app.state().editing_id.is_none() {
        output::info("Nothing is being edited.");
        return Ok(());
    }
    context.app.cancel_editing();
    output::info("Edit cancelled.");
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let id = context.resolve_expense(prefix)?;
    let action = context
        .app
        .state()
        .expense(id)
        .map(|expense| ExpenseDetail::new(expense).delete_action());
    if let Some(action) = action {
        context.app.dispatch(action);
        output::success("Expense deleted.");
    }
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.app.filter(None);
            output::info("Category filter cleared.");
        }
        [id] => {
            let found = category::find(id).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown category `{}`", id))
            })?;
            context.app.filter(Some(found.id.clone()));
            output::info(format!("Showing {} only.", found.name));
        }
        _ => {
            return Err(CommandError::InvalidArguments("usage: filter [category]".into()));
        }
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let list = context.app.list();
    output::section(list.title());
    if let Some(message) = list.empty_message() {
        output::info(message);
        return Ok(());
    }
    for detail in list.details() {
        let expense = detail.expense();
        output::plain(format!(
            "  {}  {:<24} {:>10.2}  {:<14} {}",
            detail.short_id(),
            expense.expense_name,
            expense.amount,
            detail.category_name(),
            expense.date.format("%Y-%m-%d")
        ));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [prefix] = args else {
        return Err(CommandError::InvalidArguments("usage: show <id>".into()));
    };
    let id = context.resolve_expense(prefix)?;
    if let Some(expense) = context.app.state().expense(id) {
        output::plain(ExpenseDetail::new(expense).render());
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.app.summary();
    output::section("Summary");
    output::plain(format!("  Budget     {:>10.2}", summary.budget));
    output::plain(format!("  Spent      {:>10.2}", summary.spent));
    output::plain(format!("  Remaining  {:>10.2}", summary.remaining));
    output::plain(format!("  Used       {:>9.2}%", summary.spent_percentage));
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for category in catalog() {
        output::plain(format!("  {:<14} {}", category.id, category.name));
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.reset();
    output::success("Session cleared.");
    output::info("Enter a new budget with `budget <amount>`.");
    Ok(())
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Available commands");
    for entry in context.registry.entries() {
        let aliases = if entry.aliases.is_empty() {
            String::new()
        } else {
            format!(" (also: {})", entry.aliases.join(", "))
        };
        output::plain(format!("  {:<46} {}{}", entry.usage, entry.description, aliases));
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}
