// ==========================================
// MRP 关键物料分析 - 报表模块错误类型
// ==========================================

use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Excel 报表生成失败: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("报表文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 导出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("报表读取失败: {0}")]
    Read(#[from] ImportError),

    #[error("报表格式无效: {0}")]
    InvalidReport(String),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
