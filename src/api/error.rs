// ==========================================
// MRP 关键物料分析 - API层错误类型
// ==========================================
// 职责: 将导入层/报表层错误归类为调用方可区分的类别
//   NotFound   输入文件或工作表不存在
//   Schema     缺少必需列（一次列出全部）
//   Validation 数量列非数值或为负（列 + 行号）
//   Io         读写失败
// Display 用于日志；user_message() 按当前语言整体本地化
// ==========================================

use crate::i18n::{current_locale, t_locale_with_args};
use crate::importer::{ImportError, ViolationKind};
use crate::report::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// 文件路径，或 "工作表 [可用工作表]"
    #[error("输入不存在: {0}")]
    NotFound(String),

    #[error("缺少必需列: {}（可用列: {}）", .missing.join(", "), .available.join(", "))]
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// 数值校验失败
    #[error("列 {column} 数值校验失败 ({kind:?})，行: {rows:?}")]
    Validation {
        column: String,
        kind: ViolationKind,
        rows: Vec<usize>,
    },

    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    /// 底层库的原始错误信息
    #[error("读写失败: {0}")]
    Io(String),

    /// 后台任务异常退出
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Validation { .. })
    }

    /// 面向用户的错误文本（当前语言）
    pub fn user_message(&self) -> String {
        self.user_message_in(&current_locale())
    }

    /// 面向用户的错误文本（带错误类别前缀，整句使用同一语言）
    pub fn user_message_in(&self, locale: &str) -> String {
        let detail = self.localized_detail(locale);
        let key = if self.is_validation() {
            "error.validation"
        } else {
            "error.analysis"
        };
        t_locale_with_args(key, locale, &[("message", detail.as_str())])
    }

    fn localized_detail(&self, locale: &str) -> String {
        let tr = |key: &str, args: &[(&str, &str)]| t_locale_with_args(key, locale, args);
        match self {
            AnalysisError::NotFound(target) => tr("error.not_found", &[("target", target.as_str())]),
            AnalysisError::Schema { missing, available } => tr(
                "error.schema",
                &[
                    ("missing", missing.join(", ").as_str()),
                    ("available", available.join(", ").as_str()),
                ],
            ),
            AnalysisError::Validation { column, kind, rows } => {
                let key = match kind {
                    ViolationKind::NonNumeric => "error.non_numeric",
                    ViolationKind::Negative => "error.negative",
                };
                let rows = rows
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                tr(key, &[("column", column.as_str()), ("rows", rows.as_str())])
            }
            AnalysisError::UnsupportedFormat(ext) => {
                tr("error.unsupported_format", &[("ext", ext.as_str())])
            }
            AnalysisError::Io(detail) => tr("error.io", &[("detail", detail.as_str())]),
            AnalysisError::Internal(detail) => tr("error.internal", &[("detail", detail.as_str())]),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for AnalysisError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => AnalysisError::NotFound(path),
            ImportError::SheetNotFound { sheet, available } => {
                AnalysisError::NotFound(format!("{} [{}]", sheet, available.join(", ")))
            }
            ImportError::MissingColumns { missing, available } => {
                AnalysisError::Schema { missing, available }
            }
            ImportError::NonNumericValues { column, rows } => AnalysisError::Validation {
                column,
                kind: ViolationKind::NonNumeric,
                rows,
            },
            ImportError::NegativeValues { column, rows } => AnalysisError::Validation {
                column,
                kind: ViolationKind::Negative,
                rows,
            },
            ImportError::UnsupportedFormat(ext) => AnalysisError::UnsupportedFormat(ext),
            ImportError::FileReadError(detail)
            | ImportError::ExcelParseError(detail)
            | ImportError::CsvParseError(detail)
            | ImportError::DatabaseQueryError(detail) => AnalysisError::Io(detail),
        }
    }
}

// ==========================================
// 从 ReportError 转换
// ==========================================
impl From<ReportError> for AnalysisError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Read(inner) => inner.into(),
            ReportError::Xlsx(e) => AnalysisError::Io(e.to_string()),
            ReportError::Io(e) => AnalysisError::Io(e.to_string()),
            ReportError::Csv(e) => AnalysisError::Io(e.to_string()),
            ReportError::InvalidReport(detail) => AnalysisError::Io(detail),
        }
    }
}

/// Result 类型别名
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_classification() {
        let err: AnalysisError = ImportError::FileNotFound("a.xlsx".to_string()).into();
        assert!(matches!(err, AnalysisError::NotFound(ref p) if p == "a.xlsx"));

        let err: AnalysisError = ImportError::SheetNotFound {
            sheet: "Cálculo MRP".to_string(),
            available: vec!["Plan1".to_string()],
        }
        .into();
        assert!(matches!(err, AnalysisError::NotFound(ref m) if m == "Cálculo MRP [Plan1]"));

        let err: AnalysisError = ImportError::MissingColumns {
            missing: vec!["ESTQ20".to_string(), "PEDIDOS".to_string()],
            available: vec!["CÓD".to_string()],
        }
        .into();
        assert!(matches!(err, AnalysisError::Schema { ref missing, .. } if missing.len() == 2));

        let err: AnalysisError = ImportError::ExcelParseError("zip".to_string()).into();
        assert!(matches!(err, AnalysisError::Io(ref d) if d == "zip"));

        let err: AnalysisError = ImportError::UnsupportedFormat("txt".to_string()).into();
        assert!(matches!(err, AnalysisError::UnsupportedFormat(ref e) if e == "txt"));
    }

    #[test]
    fn test_validation_keeps_column_kind_and_rows() {
        let err: AnalysisError = ImportError::NonNumericValues {
            column: "ESTQ10".to_string(),
            rows: vec![0, 3],
        }
        .into();

        match &err {
            AnalysisError::Validation { column, kind, rows } => {
                assert_eq!(column, "ESTQ10");
                assert_eq!(*kind, ViolationKind::NonNumeric);
                assert_eq!(rows, &vec![0, 3]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(err.is_validation());
    }

    #[test]
    fn test_report_error_conversion() {
        let err: AnalysisError =
            ReportError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")).into();
        assert!(matches!(err, AnalysisError::Io(ref m) if m.contains("disk full")));

        let err: AnalysisError =
            ReportError::Read(ImportError::FileNotFound("r.xlsx".to_string())).into();
        assert!(matches!(err, AnalysisError::NotFound(_)));
    }

    #[test]
    fn test_user_message_single_language() {
        let err = AnalysisError::Validation {
            column: "ESTQ10".to_string(),
            kind: ViolationKind::NonNumeric,
            rows: vec![0, 3],
        };
        assert_eq!(
            err.user_message_in("en"),
            "Validation error: column ESTQ10 has non-numeric values at rows: 0, 3"
        );
        assert_eq!(
            err.user_message_in("pt-BR"),
            "Erro de validação: a coluna ESTQ10 tem valores não numéricos nas linhas: 0, 3"
        );

        let schema = AnalysisError::Schema {
            missing: vec!["ESTQ20".to_string(), "PEDIDOS".to_string()],
            available: vec!["CÓD".to_string()],
        };
        assert_eq!(
            schema.user_message_in("pt-BR"),
            "Erro durante a análise: colunas obrigatórias ausentes: ESTQ20, PEDIDOS (disponíveis: CÓD)"
        );

        assert_eq!(
            schema.user_message_in("en"),
            "Error during analysis: missing required columns: ESTQ20, PEDIDOS (available: CÓD)"
        );
    }
}
