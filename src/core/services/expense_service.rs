//! Validated register/edit/delete operations over the expense list.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::currency::{Currency, RateTable};
use crate::domain::book::ExpenseBook;
use crate::domain::category::CategoryId;
use crate::domain::expense::Expense;
use crate::errors::{MoniError, Result};

/// Entry-form payload for a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub currency: Currency,
    pub category: CategoryId,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub description: Option<String>,
}

/// Mutations over [`ExpenseBook::expenses`]. Every operation validates before
/// touching the list, so a failure leaves the book unchanged.
pub struct ExpenseService;

impl ExpenseService {
    /// Registers an expense: validates the invariants (`amount > 0`, date not
    /// in the future, category present), converts to canonical DOP, and
    /// prepends so the list stays newest first.
    pub fn add(
        book: &mut ExpenseBook,
        rates: &RateTable,
        input: NewExpense,
        today: NaiveDate,
    ) -> Result<Uuid> {
        if !(input.amount.is_finite() && input.amount > 0.0) {
            return Err(MoniError::InvalidInput(
                "amount must be greater than zero".into(),
            ));
        }
        if input.date > today {
            return Err(MoniError::InvalidInput(format!(
                "date {} is in the future",
                input.date
            )));
        }
        if input.category.is_empty() {
            return Err(MoniError::InvalidInput("category is required".into()));
        }
        let amount_dop = rates.to_canonical(input.amount, input.currency)?;
        let expense = Expense {
            id: Uuid::new_v4(),
            amount: input.amount,
            amount_dop,
            currency: input.currency,
            category: input.category,
            date: input.date,
            time: input.time,
            description: input
                .description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        };
        let id = expense.id;
        debug!(%id, amount_dop, "expense registered");
        book.expenses.insert(0, expense);
        Ok(id)
    }

    /// Amount-only edit; the canonical amount is recomputed with the record's
    /// original entry currency.
    pub fn edit_amount(
        book: &mut ExpenseBook,
        rates: &RateTable,
        id: Uuid,
        new_amount: f64,
    ) -> Result<()> {
        if !(new_amount.is_finite() && new_amount > 0.0) {
            return Err(MoniError::InvalidInput(
                "amount must be greater than zero".into(),
            ));
        }
        let expense = book
            .expense_mut(id)
            .ok_or(MoniError::ExpenseNotFound(id))?;
        expense.amount_dop = rates.to_canonical(new_amount, expense.currency)?;
        expense.amount = new_amount;
        debug!(%id, new_amount, "expense amount updated");
        Ok(())
    }

    /// Removes a record by id, returning it for confirmation flows.
    pub fn remove(book: &mut ExpenseBook, id: Uuid) -> Result<Expense> {
        let index = book
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(MoniError::ExpenseNotFound(id))?;
        let removed = book.expenses.remove(index);
        debug!(%id, "expense deleted");
        Ok(removed)
    }
}
