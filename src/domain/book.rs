//! The in-memory session state, loaded from storage and flushed on mutation.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::category::{CategoryId, CategoryMeta};
use crate::domain::expense::Expense;
use crate::domain::limits::LimitConfig;

/// Everything one user session operates on.
///
/// Replaces ad hoc module-level globals: components receive the book
/// explicitly, mutate it, and the caller flushes the affected collection back
/// to the store. `expenses` stays ordered newest first.
#[derive(Debug, Clone, Default)]
pub struct ExpenseBook {
    pub expenses: Vec<Expense>,
    pub custom_categories: BTreeMap<CategoryId, CategoryMeta>,
    pub limits: LimitConfig,
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }
}
