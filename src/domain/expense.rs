//! The expense record and its creation-time invariants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;
use crate::domain::category::CategoryId;

pub const DESCRIPTION_PLACEHOLDER: &str = "Sin descripción";

/// A single registered expense.
///
/// `amount` stays in the entry currency; `amount_dop` is the canonical value
/// every aggregation and limit comparison uses. Records are only mutated via
/// explicit amount edits or deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default, rename = "amountDOP")]
    pub amount_dop: f64,
    #[serde(default)]
    pub currency: Currency,
    pub category: CategoryId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Expense {
    /// The canonical (DOP) amount used by aggregation.
    pub fn canonical_amount(&self) -> f64 {
        self.amount_dop
    }

    /// True when a persisted record is usable: finite positive amount.
    /// Records failing this are dropped once, at load.
    pub fn has_valid_shape(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }

    /// True when the persisted record predates canonical amounts and needs
    /// its DOP value recomputed.
    pub fn needs_canonical_amount(&self) -> bool {
        !(self.amount_dop.is_finite() && self.amount_dop > 0.0)
    }

    pub fn description_label(&self) -> &str {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
    }
}
