// ==========================================
// MRP 关键物料分析 - 应用层
// ==========================================
// 职责: 结果浏览的展示状态（筛选 / 排序 / 分页）
// ==========================================

pub mod view_state;

// 重导出
pub use view_state::{RowFilter, SortKey, ViewState};
