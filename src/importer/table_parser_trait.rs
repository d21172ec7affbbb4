// ==========================================
// MRP 关键物料分析 - 表格解析 Trait
// ==========================================
// 职责: 定义数据源读取接口（不包含实现）
// 实现者: ExcelParser, CsvParser, SqliteQuerySource
// ==========================================

use crate::domain::RawTable;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件 → RawTable
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet: 工作表名（None 表示第一个工作表；CSV 忽略）
    ///
    /// # 返回
    /// - Ok(RawTable): 首行为表头，完全空白的数据行已跳过
    /// - Err: 文件不存在、工作表不存在、格式错误
    fn parse_table(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<RawTable>;
}

// ==========================================
// QuerySource Trait
// ==========================================
// 用途: 关系查询结果 → RawTable
pub trait QuerySource: Send + Sync {
    /// 执行查询并返回原始表格（列名取自结果集）
    fn fetch_table(&self, query: &str) -> ImportResult<RawTable>;
}
