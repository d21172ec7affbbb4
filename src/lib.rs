// ==========================================
// MRP 关键物料分析 - 核心库
// ==========================================
// 输入: MRP 计算表（Excel / CSV / SQLite 查询）
// 输出: 关键物料报表 + 带时间戳的历史副本
// 系统定位: 采购请购辅助（人工最终决策）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与物料类型
pub mod domain;

// 引擎层 - 关键物料计算 / 统计 / 对比
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 报表层 - Excel / CSV 输出与回读
pub mod report;

// 配置层 - 列结构与分析器配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 分析入口
pub mod api;

// 应用层 - 结果浏览状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{CellValue, CriticalItem, InputRow, RawTable, ReportColumn};

// 引擎
pub use engine::{CalculationResult, CriticalItemCalculator, ReportStatistics};

// 配置
pub use config::{AnalyzerConfig, SchemaConfig};

// API
pub use api::{AnalysisError, AnalysisOutcome, AnalysisReport, AnalysisRequest, InputSource, MrpAnalyzer};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "MRP Critical Items";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "MRP Critical Items");
    }
}
