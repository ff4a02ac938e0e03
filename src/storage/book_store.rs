//! Adapter between the session book and the key-value store.
//!
//! Reads are defensive: malformed expense entries are dropped one by one,
//! corrupt payloads reset the affected collection to its default, and missing
//! limit keys are seeded. None of that ever surfaces as an error. Writes are
//! whole-collection, matching the store's read-modify-write discipline.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::currency::RateTable;
use crate::domain::book::ExpenseBook;
use crate::domain::category::{CategoryId, CategoryMeta};
use crate::domain::expense::Expense;
use crate::domain::limits::{
    default_category_limits, AlertSettings, LimitConfig, ZeroLimitPolicy, DEFAULT_MONTHLY_LIMIT,
};
use crate::storage::{keys, KeyValueStore};

pub struct BookStore;

impl BookStore {
    /// Loads the whole session state, seeding defaults for absent keys.
    /// `rates` backfills canonical amounts on records that predate them.
    pub fn load(store: &mut dyn KeyValueStore, rates: &RateTable) -> ExpenseBook {
        ExpenseBook {
            expenses: Self::load_expenses(store, rates),
            custom_categories: Self::load_custom_categories(store),
            limits: Self::load_limits(store),
        }
    }

    fn load_expenses(store: &mut dyn KeyValueStore, rates: &RateTable) -> Vec<Expense> {
        let raw = match store.get(keys::EXPENSES) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, "expense collection corrupt, resetting to empty");
                store.remove(keys::EXPENSES);
                return Vec::new();
            }
        };

        let total = entries.len();
        let mut expenses: Vec<Expense> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<Expense>(entry).ok())
            .filter(Expense::has_valid_shape)
            .collect();
        if expenses.len() < total {
            warn!(
                dropped = total - expenses.len(),
                "dropped malformed expense entries at load"
            );
        }
        for expense in &mut expenses {
            if expense.needs_canonical_amount() {
                if let Ok(amount_dop) = rates.to_canonical(expense.amount, expense.currency) {
                    expense.amount_dop = amount_dop;
                }
            }
        }
        expenses
    }

    fn load_custom_categories(store: &mut dyn KeyValueStore) -> BTreeMap<CategoryId, CategoryMeta> {
        let raw = match store.get(keys::CUSTOM_CATEGORIES) {
            Some(raw) => raw,
            None => return BTreeMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(categories) => categories,
            Err(err) => {
                warn!(%err, "custom categories corrupt, resetting to empty");
                store.remove(keys::CUSTOM_CATEGORIES);
                BTreeMap::new()
            }
        }
    }

    fn load_limits(store: &mut dyn KeyValueStore) -> LimitConfig {
        let monthly_limit = match store.get(keys::MONTHLY_LIMIT) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    warn!(%raw, "monthly limit unreadable, reseeding default");
                    store.set(keys::MONTHLY_LIMIT, DEFAULT_MONTHLY_LIMIT.to_string());
                    DEFAULT_MONTHLY_LIMIT
                }
            },
            None => {
                store.set(keys::MONTHLY_LIMIT, DEFAULT_MONTHLY_LIMIT.to_string());
                DEFAULT_MONTHLY_LIMIT
            }
        };

        let category_limits = match store.get(keys::CATEGORY_LIMITS) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(limits) => limits,
                Err(err) => {
                    warn!(%err, "category limits corrupt, reseeding defaults");
                    let defaults = default_category_limits();
                    Self::write_json(store, keys::CATEGORY_LIMITS, &defaults);
                    defaults
                }
            },
            None => {
                let defaults = default_category_limits();
                Self::write_json(store, keys::CATEGORY_LIMITS, &defaults);
                defaults
            }
        };

        let alert_settings = match store.get(keys::ALERT_SETTINGS) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(%err, "alert settings corrupt, reseeding defaults");
                    let defaults = AlertSettings::default();
                    Self::write_json(store, keys::ALERT_SETTINGS, &defaults);
                    defaults
                }
            },
            None => {
                let defaults = AlertSettings::default();
                Self::write_json(store, keys::ALERT_SETTINGS, &defaults);
                defaults
            }
        };

        LimitConfig {
            monthly_limit,
            category_limits,
            alert_settings,
            zero_limit_policy: ZeroLimitPolicy::default(),
        }
    }

    pub fn save_expenses(store: &mut dyn KeyValueStore, book: &ExpenseBook) {
        Self::write_json(store, keys::EXPENSES, &book.expenses);
    }

    pub fn save_custom_categories(store: &mut dyn KeyValueStore, book: &ExpenseBook) {
        Self::write_json(store, keys::CUSTOM_CATEGORIES, &book.custom_categories);
    }

    pub fn save_limits(store: &mut dyn KeyValueStore, book: &ExpenseBook) {
        store.set(
            keys::MONTHLY_LIMIT,
            book.limits.monthly_limit.to_string(),
        );
        Self::write_json(store, keys::CATEGORY_LIMITS, &book.limits.category_limits);
        Self::write_json(store, keys::ALERT_SETTINGS, &book.limits.alert_settings);
    }

    pub fn save_all(store: &mut dyn KeyValueStore, book: &ExpenseBook) {
        Self::save_expenses(store, book);
        Self::save_custom_categories(store, book);
        Self::save_limits(store, book);
    }

    fn write_json<T: serde::Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => store.set(key, json),
            Err(err) => warn!(key, %err, "failed to serialize collection"),
        }
    }
}
