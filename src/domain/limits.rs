//! Spending-limit configuration and alert settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryId;

pub const DEFAULT_MONTHLY_LIMIT: f64 = 15_000.0;

/// Which alert tiers are active and whether out-of-band notification is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertSettings {
    #[serde(default = "default_true", rename = "alert80")]
    pub alert_80: bool,
    #[serde(default = "default_true", rename = "alert100")]
    pub alert_100: bool,
    #[serde(default, rename = "emailAlerts")]
    pub email_alerts: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            alert_80: true,
            alert_100: true,
            email_alerts: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// How a non-positive monthly limit is interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ZeroLimitPolicy {
    /// A limit of zero means every peso spent is over budget.
    #[default]
    AlwaysCritical,
    /// A limit of zero disables the cap entirely.
    NoLimit,
}

/// Overall and per-category caps, seeded with defaults on first load and
/// persisted whole on every save.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitConfig {
    pub monthly_limit: f64,
    pub category_limits: BTreeMap<CategoryId, f64>,
    pub alert_settings: AlertSettings,
    pub zero_limit_policy: ZeroLimitPolicy,
}

impl LimitConfig {
    pub fn category_limit(&self, id: &CategoryId) -> Option<f64> {
        self.category_limits.get(id).copied()
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            monthly_limit: DEFAULT_MONTHLY_LIMIT,
            category_limits: default_category_limits(),
            alert_settings: AlertSettings::default(),
            zero_limit_policy: ZeroLimitPolicy::default(),
        }
    }
}

/// Default per-category caps. Covers the built-in set only.
pub fn default_category_limits() -> BTreeMap<CategoryId, f64> {
    [
        ("comida", 5_000.0),
        ("transporte", 2_000.0),
        ("entretenimiento", 1_500.0),
        ("educación", 3_000.0),
        ("salud", 4_000.0),
        ("hogar", 3_500.0),
    ]
    .into_iter()
    .map(|(id, limit)| (CategoryId::new(id), limit))
    .collect()
}
