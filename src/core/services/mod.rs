pub mod aggregation_service;
pub mod category_registry;
pub mod expense_service;
pub mod limit_service;
pub mod report_service;

pub use aggregation_service::{AggregationService, Breakdown, CategoryTotal, PeriodTotals};
pub use category_registry::CategoryRegistry;
pub use expense_service::{ExpenseService, NewExpense};
pub use limit_service::{AlertLevel, CategoryLimitStatus, LimitService, LimitStatus};
pub use report_service::{ReportQuery, ReportRow, ReportService, ReportSummary};
