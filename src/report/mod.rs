// ==========================================
// MRP 关键物料分析 - 报表层
// ==========================================
// 职责: Excel 报表 + 历史副本、CSV 导出、报表回读
// ==========================================

pub mod csv_export;
pub mod error;
pub mod excel_writer;
pub mod report_reader;

// 重导出核心类型
pub use csv_export::{export_csv, write_csv};
pub use error::{ReportError, ReportResult};
pub use excel_writer::{ReportArtifacts, ReportWriter, HISTORY_TIMESTAMP_FORMAT};
pub use report_reader::{items_from_table, read_report};
