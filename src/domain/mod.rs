// ==========================================
// MRP 关键物料分析 - 领域模型层
// ==========================================
// 职责: 定义表格、物料、报表列等领域类型
// 红线: 不含 I/O,不含计算逻辑
// ==========================================

pub mod item;
pub mod table;

// 重导出核心类型
pub use item::{CriticalItem, InputRow, ReportColumn};
pub use table::{CellValue, RawTable};
