// ==========================================
// MRP 关键物料分析 - 引擎层
// ==========================================
// 职责: 关键物料计算、结果统计、前后对比
// 红线: 纯计算，不含 I/O
// ==========================================

pub mod comparison;
pub mod critical_items;
pub mod statistics;

// 重导出核心类型
pub use comparison::{compare_analyses, ComparisonError, ComparisonRow, ComparisonStatus};
pub use critical_items::{
    available_stock, is_critical, is_inactive, quantity_to_request, CalculationResult,
    CriticalItemCalculator, SECONDARY_STOCK_DIVISOR,
};
pub use statistics::ReportStatistics;
