//! Compares aggregated totals against configured caps.

use std::fmt;

use chrono::NaiveDate;

use crate::core::services::aggregation_service::AggregationService;
use crate::currency::format_dop;
use crate::domain::book::ExpenseBook;
use crate::domain::category::CategoryId;
use crate::domain::limits::{AlertSettings, ZeroLimitPolicy};
use crate::domain::window::ReportWindow;

/// Severity derived from the spend-to-limit ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertLevel {
    None,
    Warning,
    Critical,
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertLevel::None => "None",
            AlertLevel::Warning => "Warning",
            AlertLevel::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Spend position against a single cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitStatus {
    pub limit: f64,
    pub spent: f64,
    pub level: AlertLevel,
}

impl LimitStatus {
    /// Remaining budget. Negative when over the cap; never clamped.
    pub fn available(&self) -> f64 {
        self.limit - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.available() < 0.0
    }

    /// Percentage of the cap consumed; 0 when no positive cap is set.
    pub fn percentage(&self) -> f64 {
        if self.limit > 0.0 {
            self.spent / self.limit * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLimitStatus {
    pub category: CategoryId,
    pub status: LimitStatus,
}

/// Pure threshold evaluation. No alert history and no deduplication: every
/// recomputation re-evaluates from scratch.
pub struct LimitService;

impl LimitService {
    /// Three-tier evaluation: Critical at 100% of the cap, Warning at 80%.
    /// Monotonic in `spent` for a fixed limit.
    pub fn evaluate(spent: f64, limit: f64, policy: ZeroLimitPolicy) -> AlertLevel {
        if limit <= 0.0 {
            return match policy {
                ZeroLimitPolicy::AlwaysCritical => AlertLevel::Critical,
                ZeroLimitPolicy::NoLimit => AlertLevel::None,
            };
        }
        let ratio = spent / limit;
        if ratio >= 1.0 {
            AlertLevel::Critical
        } else if ratio >= 0.8 {
            AlertLevel::Warning
        } else {
            AlertLevel::None
        }
    }

    /// Current-month spend against the overall monthly cap.
    pub fn monthly_status(book: &ExpenseBook, today: NaiveDate) -> LimitStatus {
        let spent = AggregationService::window_total(&book.expenses, ReportWindow::Month, today);
        let limit = book.limits.monthly_limit;
        LimitStatus {
            limit,
            spent,
            level: Self::evaluate(spent, limit, book.limits.zero_limit_policy),
        }
    }

    /// Per-category month spend against each configured category cap.
    /// Categories without a configured cap are skipped.
    pub fn category_statuses(book: &ExpenseBook, today: NaiveDate) -> Vec<CategoryLimitStatus> {
        let breakdown =
            AggregationService::aggregate(&book.expenses, ReportWindow::Month, today);
        book.limits
            .category_limits
            .iter()
            .map(|(category, &limit)| {
                let spent = breakdown
                    .per_category
                    .iter()
                    .find(|entry| &entry.category == category)
                    .map(|entry| entry.total)
                    .unwrap_or(0.0);
                CategoryLimitStatus {
                    category: category.clone(),
                    status: LimitStatus {
                        limit,
                        spent,
                        level: Self::evaluate(spent, limit, book.limits.zero_limit_policy),
                    },
                }
            })
            .collect()
    }

    /// Applies the user's alert toggles to a computed level. A disabled 100%
    /// tier degrades Critical to the 80% tier when that one is still active.
    pub fn active_alert(level: AlertLevel, settings: AlertSettings) -> AlertLevel {
        match level {
            AlertLevel::Critical if settings.alert_100 => AlertLevel::Critical,
            AlertLevel::Critical | AlertLevel::Warning if settings.alert_80 => AlertLevel::Warning,
            _ => AlertLevel::None,
        }
    }

    /// User-facing alert text for the monthly status, if any tier fired.
    pub fn alert_message(status: &LimitStatus) -> Option<String> {
        match status.level {
            AlertLevel::Critical => Some(format!(
                "🚨 ¡Has superado tu límite mensual! Gastaste {} de {}",
                format_dop(status.spent),
                format_dop(status.limit)
            )),
            AlertLevel::Warning => Some(format!(
                "Estás cerca de tu límite mensual ({:.0}%). Has gastado {} de {}",
                status.percentage(),
                format_dop(status.spent),
                format_dop(status.limit)
            )),
            AlertLevel::None => None,
        }
    }
}
