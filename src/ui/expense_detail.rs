use std::cmp;

use crate::core::store::BudgetAction;
use crate::domain::{category, Expense};

/// A simple key/value pair for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub key: &'static str,
    pub value: String,
}

/// One expense as shown in the list, plus the actions it offers.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseDetail<'a> {
    expense: &'a Expense,
}

impl<'a> ExpenseDetail<'a> {
    pub fn new(expense: &'a Expense) -> Self {
        Self { expense }
    }

    pub fn expense(&self) -> &'a Expense {
        self.expense
    }

    /// Display name of the expense's category, falling back to its raw id.
    pub fn category_name(&self) -> &'a str {
        category::find(&self.expense.category)
            .map_or(self.expense.category.as_str(), |found| found.name.as_str())
    }

    /// Eight-character id prefix users can type to refer to this expense.
    pub fn short_id(&self) -> String {
        self.expense.id.simple().to_string()[..8].to_string()
    }

    pub fn fields(&self) -> Vec<DetailField> {
        vec![
            DetailField {
                key: "id",
                value: self.short_id(),
            },
            DetailField {
                key: "name",
                value: self.expense.expense_name.clone(),
            },
            DetailField {
                key: "amount",
                value: format!("{:.2}", self.expense.amount),
            },
            DetailField {
                key: "category",
                value: self.category_name().to_string(),
            },
            DetailField {
                key: "date",
                value: self.expense.date.format("%Y-%m-%d").to_string(),
            },
        ]
    }

    /// Selects this expense for editing.
    pub fn edit_action(&self) -> BudgetAction {
        BudgetAction::GetExpenseById {
            id: self.expense.id,
        }
    }

    pub fn delete_action(&self) -> BudgetAction {
        BudgetAction::DeleteExpense {
            id: self.expense.id,
        }
    }

    /// Renders the fields as an aligned block under a rule.
    pub fn render(&self) -> String {
        let fields = self.fields();
        let key_width = fields.iter().map(|field| field.key.len()).max().unwrap_or(0);
        let lines: Vec<String> = fields
            .iter()
            .map(|field| format!("  {:<key_width$}  {}", field.key, field.value))
            .collect();
        let rule_len = cmp::max(lines.iter().map(String::len).max().unwrap_or(0), 40);
        let rule = "-".repeat(rule_len);

        let mut output = String::new();
        output.push_str(&self.expense.expense_name);
        output.push('\n');
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&lines.join("\n"));
        output.push('\n');
        output.push_str(&rule);
        output
    }
}
