// ==========================================
// MRP 关键物料分析 - 配置层
// ==========================================
// 职责: 输入列结构（SchemaConfig）与分析器配置（AnalyzerConfig）
// 存储: JSON 文件（~/.mrp_analyzer/config.json）
// ==========================================

pub mod analyzer_config;

// 重导出核心配置类型
pub use analyzer_config::{AnalyzerConfig, ColumnSpec, ConfigError, SchemaConfig};
