//! Sums over the record list for fixed and custom time windows.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::category::CategoryId;
use crate::domain::expense::Expense;
use crate::domain::window::ReportWindow;

/// Canonical total for one category within a window.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryId,
    pub total: f64,
}

/// Per-category totals plus the grand total for a window.
///
/// Categories are sorted descending by total; ties keep first-encountered
/// order. Dangling category ids are kept verbatim and resolved to fallback
/// metadata only at render time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    pub per_category: Vec<CategoryTotal>,
    pub total: f64,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.per_category.is_empty()
    }

    /// Percentage shares of the grand total. Empty when the total is zero:
    /// callers treat that as a neutral state, never as a division error.
    pub fn percentages(&self) -> Vec<(CategoryId, f64)> {
        if self.total <= 0.0 {
            return Vec::new();
        }
        self.per_category
            .iter()
            .map(|entry| (entry.category.clone(), entry.total / self.total * 100.0))
            .collect()
    }

    pub fn share_of(&self, category: &CategoryId) -> Option<f64> {
        if self.total <= 0.0 {
            return None;
        }
        self.per_category
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.total / self.total * 100.0)
    }

    /// The single highest-total category, or `None` when nothing matched.
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.per_category.first()
    }

    /// Pie-chart segments as `(category, start_deg, end_deg)`, in breakdown
    /// order. Empty when the total is zero, like [`Self::percentages`].
    pub fn angles(&self) -> Vec<(CategoryId, f64, f64)> {
        let mut current = 0.0;
        self.percentages()
            .into_iter()
            .map(|(category, share)| {
                let start = current;
                current += share / 100.0 * 360.0;
                (category, start, current)
            })
            .collect()
    }
}

/// Dashboard header sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub today: f64,
    pub week: f64,
    pub month: f64,
}

/// Stateless aggregation over record lists. Records are assumed pre-filtered
/// for shape by the storage adapter; this layer never re-validates.
pub struct AggregationService;

impl AggregationService {
    pub fn filter_by_window<'a>(
        expenses: &'a [Expense],
        window: ReportWindow,
        today: NaiveDate,
    ) -> Vec<&'a Expense> {
        expenses
            .iter()
            .filter(|expense| window.contains(expense.date, today))
            .collect()
    }

    /// Groups the window's records by category id, summing canonical amounts.
    pub fn aggregate(expenses: &[Expense], window: ReportWindow, today: NaiveDate) -> Breakdown {
        let mut order: Vec<CategoryId> = Vec::new();
        let mut totals: HashMap<CategoryId, f64> = HashMap::new();
        let mut grand_total = 0.0;

        for expense in Self::filter_by_window(expenses, window, today) {
            if expense.category.is_empty() {
                continue;
            }
            let amount = expense.canonical_amount();
            grand_total += amount;
            match totals.get_mut(&expense.category) {
                Some(entry) => *entry += amount,
                None => {
                    totals.insert(expense.category.clone(), amount);
                    order.push(expense.category.clone());
                }
            }
        }

        let mut per_category: Vec<CategoryTotal> = order
            .into_iter()
            .map(|category| {
                let total = totals[&category];
                CategoryTotal { category, total }
            })
            .collect();
        // Vec::sort_by is stable, so equal totals keep encounter order.
        per_category.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

        Breakdown {
            per_category,
            total: grand_total,
        }
    }

    /// Canonical sum of a window, without the per-category grouping. Unlike
    /// [`Self::aggregate`], uncategorized records still count here.
    pub fn window_total(expenses: &[Expense], window: ReportWindow, today: NaiveDate) -> f64 {
        Self::filter_by_window(expenses, window, today)
            .iter()
            .map(|expense| expense.canonical_amount())
            .sum()
    }

    pub fn period_totals(expenses: &[Expense], today: NaiveDate) -> PeriodTotals {
        PeriodTotals {
            today: Self::window_total(expenses, ReportWindow::Today, today),
            week: Self::window_total(expenses, ReportWindow::Week, today),
            month: Self::window_total(expenses, ReportWindow::Month, today),
        }
    }

    /// Newest records first, for the dashboard list. The book keeps insertion
    /// order newest-first, so a stable sort by date preserves recency within
    /// a day.
    pub fn recent(expenses: &[Expense], limit: usize) -> Vec<&Expense> {
        let mut sorted: Vec<&Expense> = expenses.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use uuid::Uuid;

    fn expense(amount: f64, category: &str, date: NaiveDate) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            amount,
            amount_dop: amount,
            currency: Currency::Dop,
            category: CategoryId::new(category),
            date,
            time: None,
            description: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn per_category_totals_sum_to_grand_total() {
        let today = date(2025, 6, 17);
        let expenses = vec![
            expense(100.0, "comida", today),
            expense(50.0, "transporte", today),
            expense(25.5, "comida", date(2025, 6, 2)),
        ];
        let breakdown = AggregationService::aggregate(&expenses, ReportWindow::Month, today);
        let summed: f64 = breakdown.per_category.iter().map(|c| c.total).sum();
        assert!((summed - breakdown.total).abs() < 1e-9);
        assert!((breakdown.total - 175.5).abs() < 1e-9);
    }

    #[test]
    fn breakdown_sorts_descending_with_stable_ties() {
        let today = date(2025, 6, 17);
        let expenses = vec![
            expense(40.0, "salud", today),
            expense(40.0, "hogar", today),
            expense(90.0, "comida", today),
        ];
        let breakdown = AggregationService::aggregate(&expenses, ReportWindow::Today, today);
        let order: Vec<&str> = breakdown
            .per_category
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["comida", "salud", "hogar"]);
    }

    #[test]
    fn dangling_category_ids_are_grouped_verbatim() {
        let today = date(2025, 6, 17);
        let expenses = vec![expense(10.0, "mascotas", today)];
        let breakdown = AggregationService::aggregate(&expenses, ReportWindow::Today, today);
        assert_eq!(breakdown.per_category[0].category.as_str(), "mascotas");
    }

    #[test]
    fn empty_window_yields_neutral_state() {
        let today = date(2025, 6, 17);
        let breakdown = AggregationService::aggregate(&[], ReportWindow::Month, today);
        assert_eq!(breakdown.total, 0.0);
        assert!(breakdown.is_empty());
        assert!(breakdown.percentages().is_empty());
        assert!(breakdown.top_category().is_none());
    }

    #[test]
    fn angles_cover_the_full_circle() {
        let today = date(2025, 6, 17);
        let expenses = vec![
            expense(75.0, "comida", today),
            expense(25.0, "salud", today),
        ];
        let breakdown = AggregationService::aggregate(&expenses, ReportWindow::Today, today);
        let angles = breakdown.angles();
        assert_eq!(angles.len(), 2);
        assert_eq!(angles[0].1, 0.0);
        assert!((angles[0].2 - 270.0).abs() < 1e-9);
        assert!((angles[1].1 - 270.0).abs() < 1e-9);
        assert!((angles[1].2 - 360.0).abs() < 1e-9);
    }

    #[test]
    fn recent_lists_newest_dates_first() {
        let expenses = vec![
            expense(1.0, "comida", date(2025, 6, 10)),
            expense(2.0, "salud", date(2025, 6, 15)),
            expense(3.0, "hogar", date(2025, 6, 1)),
        ];
        let recent = AggregationService::recent(&expenses, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, date(2025, 6, 15));
        assert_eq!(recent[1].date, date(2025, 6, 10));
    }

    #[test]
    fn today_is_a_subset_of_month() {
        let today = date(2025, 6, 17);
        let expenses = vec![
            expense(10.0, "comida", today),
            expense(20.0, "hogar", date(2025, 6, 3)),
            expense(30.0, "salud", date(2025, 5, 20)),
        ];
        let todays = AggregationService::filter_by_window(&expenses, ReportWindow::Today, today);
        let months = AggregationService::filter_by_window(&expenses, ReportWindow::Month, today);
        for record in &todays {
            assert!(months.iter().any(|other| other.id == record.id));
        }
        assert_eq!(months.len(), 2);
    }
}
