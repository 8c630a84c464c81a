//! Trip-level expense rollup: per category and in aggregate, how much is
//! committed, how much was advanced, and what remains to pay.

use rota_core::trip::{ExpenseCategory, TripExpenses};
use rota_shared::money::{num_or_zero, round_cents};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: ExpenseCategory,
    pub label: &'static str,
    pub expense_total: f64,
    pub advance_paid: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpenseSummary {
    pub categories: Vec<CategoryBreakdown>,
    pub expense_total: f64,
    pub advance_paid: f64,
    pub remaining: f64,
}

/// Roll the expense form up into per-category and aggregate figures.
/// Missing fields count as 0; `remaining = expense_total − advance_paid`.
pub fn trip_expense_summary(expenses: &TripExpenses) -> ExpenseSummary {
    let mut categories = Vec::with_capacity(ExpenseCategory::ALL.len());
    let mut total = 0.0;
    let mut advanced = 0.0;

    for (category, line) in expenses.lines() {
        let expense_total = num_or_zero(line.expense_total);
        let advance_paid = num_or_zero(line.advance_paid);
        total += expense_total;
        advanced += advance_paid;
        categories.push(CategoryBreakdown {
            category,
            label: category.label(),
            expense_total,
            advance_paid,
            remaining: round_cents(expense_total - advance_paid),
        });
    }

    ExpenseSummary {
        categories,
        expense_total: round_cents(total),
        advance_paid: round_cents(advanced),
        remaining: round_cents(total - advanced),
    }
}
