//! Tabular report data: summaries, averages, and rows for presentation.

use chrono::NaiveDate;

use crate::core::services::aggregation_service::AggregationService;
use crate::core::services::category_registry::CategoryRegistry;
use crate::currency::format_dop;
use crate::domain::book::ExpenseBook;
use crate::domain::category::CategoryId;
use crate::domain::expense::Expense;
use crate::domain::window::ReportWindow;

/// Window plus optional category filter for a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub window: ReportWindow,
    pub category: Option<CategoryId>,
}

impl ReportQuery {
    pub fn for_window(window: ReportWindow) -> Self {
        Self {
            window,
            category: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub total: f64,
    pub average_per_day: f64,
    /// Highest-total category in the filtered set; `None` when nothing
    /// matched (a sentinel, not an error).
    pub top_category: Option<CategoryId>,
    pub records: usize,
}

/// One table row, with category metadata already joined for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub description: String,
    pub category: CategoryId,
    pub category_label: String,
    pub amount_dop: f64,
    pub formatted_amount: String,
}

pub struct ReportService;

impl ReportService {
    fn filtered<'a>(
        book: &'a ExpenseBook,
        query: &ReportQuery,
        today: NaiveDate,
    ) -> Vec<&'a Expense> {
        AggregationService::filter_by_window(&book.expenses, query.window, today)
            .into_iter()
            .filter(|expense| match &query.category {
                Some(category) => &expense.category == category,
                None => true,
            })
            .collect()
    }

    pub fn summary(book: &ExpenseBook, query: &ReportQuery, today: NaiveDate) -> ReportSummary {
        let filtered = Self::filtered(book, query, today);
        let total: f64 = filtered
            .iter()
            .map(|expense| expense.canonical_amount())
            .sum();
        let days = query.window.day_count();
        let average_per_day = if days > 0 { total / days as f64 } else { 0.0 };

        let mut breakdown = AggregationService::aggregate(&book.expenses, query.window, today);
        if let Some(category) = &query.category {
            breakdown.per_category.retain(|entry| &entry.category == category);
        }
        let top_category = breakdown
            .top_category()
            .map(|entry| entry.category.clone());

        ReportSummary {
            total,
            average_per_day,
            top_category,
            records: filtered.len(),
        }
    }

    /// Rows sorted by date descending, with resolved category labels and
    /// formatted canonical amounts, ready for a table or PDF layer.
    pub fn rows(book: &ExpenseBook, query: &ReportQuery, today: NaiveDate) -> Vec<ReportRow> {
        let mut filtered = Self::filtered(book, query, today);
        filtered.sort_by(|a, b| b.date.cmp(&a.date));
        filtered
            .into_iter()
            .map(|expense| {
                let meta = CategoryRegistry::resolve(book, &expense.category);
                ReportRow {
                    date: expense.date,
                    description: expense.description_label().to_string(),
                    category: expense.category.clone(),
                    category_label: meta.label(),
                    amount_dop: expense.canonical_amount(),
                    formatted_amount: format_dop(expense.canonical_amount()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, category: &str, day: NaiveDate) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            amount,
            amount_dop: amount,
            currency: Currency::Dop,
            category: CategoryId::new(category),
            date: day,
            time: None,
            description: None,
        }
    }

    fn sample_book(today: NaiveDate) -> ExpenseBook {
        let mut book = ExpenseBook::new();
        book.expenses = vec![
            expense(300.0, "comida", today),
            expense(120.0, "transporte", date(2025, 6, 10)),
            expense(80.0, "comida", date(2025, 6, 2)),
        ];
        book
    }

    #[test]
    fn summary_reports_total_average_and_top_category() {
        let today = date(2025, 6, 17);
        let book = sample_book(today);
        let query = ReportQuery::for_window(ReportWindow::Month);
        let summary = ReportService::summary(&book, &query, today);
        assert!((summary.total - 500.0).abs() < 1e-9);
        assert!((summary.average_per_day - 500.0 / 30.0).abs() < 1e-9);
        assert_eq!(summary.top_category.as_ref().map(|c| c.as_str()), Some("comida"));
        assert_eq!(summary.records, 3);
    }

    #[test]
    fn empty_result_uses_the_none_sentinel() {
        let today = date(2025, 6, 17);
        let book = ExpenseBook::new();
        let summary =
            ReportService::summary(&book, &ReportQuery::for_window(ReportWindow::Today), today);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.top_category, None);
        assert_eq!(summary.records, 0);
    }

    #[test]
    fn rows_are_sorted_newest_first_and_resolve_labels() {
        let today = date(2025, 6, 17);
        let book = sample_book(today);
        let rows =
            ReportService::rows(&book, &ReportQuery::for_window(ReportWindow::Month), today);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].date >= rows[1].date && rows[1].date >= rows[2].date);
        assert_eq!(rows[0].category_label, "🍔 Comida");
        assert_eq!(rows[0].formatted_amount, "RD$ 300.00");
        assert_eq!(rows[0].description, "Sin descripción");
    }

    #[test]
    fn category_filter_narrows_the_report() {
        let today = date(2025, 6, 17);
        let book = sample_book(today);
        let query = ReportQuery {
            window: ReportWindow::Month,
            category: Some(CategoryId::new("comida")),
        };
        let summary = ReportService::summary(&book, &query, today);
        assert!((summary.total - 380.0).abs() < 1e-9);
        assert_eq!(summary.records, 2);
    }
}
