// ==========================================
// MRP 关键物料分析 - 分析 API
// ==========================================
// 职责: 串联 读取 → 列规范化 → 数值校验 → 计算 → 报表输出
// 调用面:
//   run()     类型化结果 Result<AnalysisReport, AnalysisError>
//   analyze() (数量, 错误信息, 结果表)，错误与结果二者必居其一
//   analyze_in_background() 在 tokio 阻塞线程池上执行
// ==========================================

use crate::api::error::{AnalysisError, AnalysisResult};
use crate::api::observer::{AnalysisEvent, AnalysisObserver, TracingObserver};
use crate::config::AnalyzerConfig;
use crate::domain::{CriticalItem, RawTable};
use crate::engine::{CalculationResult, CriticalItemCalculator, ReportStatistics};
use crate::importer::{
    ColumnNormalizer, NumericValidator, QuerySource, RowMapper, SqliteQuerySource,
    UniversalFileParser,
};
use crate::report::ReportWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// 输入来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    /// 表格文件（Excel / CSV）；sheet 为 None 时使用配置的默认工作表
    File { path: PathBuf, sheet: Option<String> },
    /// SQLite 数据库查询
    Query { db_path: PathBuf, query: String },
}

impl InputSource {
    pub fn file(path: impl Into<PathBuf>, sheet: Option<&str>) -> Self {
        InputSource::File {
            path: path.into(),
            sheet: sheet.map(str::to_string),
        }
    }

    pub fn query(db_path: impl Into<PathBuf>, query: impl Into<String>) -> Self {
        InputSource::Query {
            db_path: db_path.into(),
            query: query.into(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File { path, sheet: Some(sheet) } => {
                write!(f, "{} [{}]", path.display(), sheet)
            }
            InputSource::File { path, sheet: None } => write!(f, "{}", path.display()),
            InputSource::Query { db_path, .. } => write!(f, "{} [query]", db_path.display()),
        }
    }
}

// ==========================================
// 请求与结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub source: InputSource,
    pub output: PathBuf,
}

impl AnalysisRequest {
    pub fn new(source: InputSource, output: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output: output.into(),
        }
    }
}

/// 一次成功分析的完整结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub items: Vec<CriticalItem>,
    pub count: usize,
    pub output_path: PathBuf,
    pub history_path: PathBuf,
    pub evaluated_rows: usize,
    pub excluded_inactive: usize,
    pub statistics: ReportStatistics,
}

/// 宿主调用面：(数量, 错误信息, 结果表)
///
/// 成功时 error 为 None；失败时 count 与 table 均为 None。
/// 零个关键物料是成功结果：(Some(0), None, Some([]))。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub count: Option<usize>,
    pub error: Option<String>,
    pub table: Option<Vec<CriticalItem>>,
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl From<AnalysisResult<AnalysisReport>> for AnalysisOutcome {
    fn from(result: AnalysisResult<AnalysisReport>) -> Self {
        match result {
            Ok(report) => Self {
                count: Some(report.count),
                error: None,
                table: Some(report.items),
            },
            Err(err) => Self {
                count: None,
                error: Some(err.user_message()),
                table: None,
            },
        }
    }
}

// ==========================================
// MrpAnalyzer
// ==========================================
pub struct MrpAnalyzer {
    config: AnalyzerConfig,
    observer: Arc<dyn AnalysisObserver>,
}

impl MrpAnalyzer {
    /// 使用默认观察者（tracing）创建分析器
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: AnalyzerConfig, observer: Arc<dyn AnalysisObserver>) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// 宿主调用面
    ///
    /// # 参数
    /// - input: 输入文件
    /// - sheet: 工作表名（CSV 忽略）
    /// - output: 主报表路径
    pub fn analyze(&self, input: &Path, sheet: &str, output: &Path) -> AnalysisOutcome {
        let request = AnalysisRequest::new(InputSource::file(input, Some(sheet)), output);
        self.run(&request).into()
    }

    /// 执行一次完整分析
    pub fn run(&self, request: &AnalysisRequest) -> AnalysisResult<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("analysis", run_id = %run_id);
        let _enter = span.enter();

        self.observer.notify(&AnalysisEvent::Started {
            source: request.source.to_string(),
        });

        let result = self.execute(run_id, request);
        match &result {
            Ok(report) => self.observer.notify(&AnalysisEvent::Completed {
                items: report.count,
                output: report.output_path.display().to_string(),
            }),
            Err(err) => self.observer.notify(&AnalysisEvent::Failed {
                message: err.to_string(),
            }),
        }
        result
    }

    fn execute(&self, run_id: Uuid, request: &AnalysisRequest) -> AnalysisResult<AnalysisReport> {
        let table = self.load_table(&request.source)?;
        self.observer.notify(&AnalysisEvent::TableLoaded {
            rows: table.row_count(),
            columns: table.headers().len(),
        });

        let calculation = self.compute(&table)?;
        if calculation.excluded_inactive > 0 {
            self.observer.notify(&AnalysisEvent::InactiveExcluded {
                rows: calculation.excluded_inactive,
            });
        }

        let artifacts = self.report_writer().write_with_history(
            &calculation.items,
            &request.output,
            chrono::Local::now().naive_local(),
        )?;

        let statistics = ReportStatistics::from_items(&calculation.items);
        Ok(AnalysisReport {
            run_id,
            count: calculation.count(),
            items: calculation.items,
            output_path: artifacts.primary,
            history_path: artifacts.history,
            evaluated_rows: calculation.evaluated_rows,
            excluded_inactive: calculation.excluded_inactive,
            statistics,
        })
    }

    /// 读取输入表格
    pub fn load_table(&self, source: &InputSource) -> AnalysisResult<RawTable> {
        let table = match source {
            InputSource::File { path, sheet } => {
                let sheet = sheet
                    .as_deref()
                    .unwrap_or(self.config.default_sheet_name.as_str());
                UniversalFileParser.parse(path, Some(sheet))?
            }
            InputSource::Query { db_path, query } => {
                SqliteQuerySource::new(db_path.clone()).fetch_table(query)?
            }
        };
        Ok(table)
    }

    /// 纯计算部分：列规范化 → 数值校验 → 行映射 → 关键物料计算
    pub fn compute(&self, table: &RawTable) -> AnalysisResult<CalculationResult> {
        let schema = &self.config.schema;

        let normalized = ColumnNormalizer::new(schema).normalize_and_check(table)?;
        NumericValidator.validate(&normalized, &schema.numeric_columns())?;
        let rows = RowMapper::new(schema).map_rows(&normalized)?;

        Ok(CriticalItemCalculator::new().calculate(&rows))
    }

    fn report_writer(&self) -> ReportWriter {
        ReportWriter::new(
            crate::i18n::t_locale("report.sheet_name", &self.config.report_locale),
            self.config.history_dir.clone(),
            self.config.history_file_prefix.clone(),
        )
    }
}

/// 在 tokio 阻塞线程池上执行分析
pub async fn analyze_in_background(
    analyzer: Arc<MrpAnalyzer>,
    request: AnalysisRequest,
) -> AnalysisResult<AnalysisReport> {
    tokio::task::spawn_blocking(move || analyzer.run(&request))
        .await
        .map_err(|e| AnalysisError::Internal(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::observer::RecordingObserver;
    use crate::domain::CellValue;

    fn headers() -> Vec<String> {
        [
            "CÓD",
            "DESCRIÇÃOPROMOB",
            "ESTQ10",
            "ESTQ20",
            "DEMANDAMRP",
            "ESTOQSEG",
            "Fornecedor Principal",
            "PEDIDOS",
            "OBS",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    fn row(code: &str, nums: [f64; 4], on_order: f64) -> Vec<CellValue> {
        vec![
            CellValue::Text(code.to_string()),
            CellValue::Text(format!("Item {code}")),
            CellValue::Number(nums[0]),
            CellValue::Number(nums[1]),
            CellValue::Number(nums[2]),
            CellValue::Number(nums[3]),
            CellValue::Text("ACME".to_string()),
            CellValue::Number(on_order),
            CellValue::Empty,
        ]
    }

    #[test]
    fn test_compute_scenarios() {
        let analyzer = MrpAnalyzer::new(AnalyzerConfig::default());
        let table = RawTable::new(
            headers(),
            vec![
                row("A1", [10.0, 30.0, 50.0, 5.0], 0.0),
                row("B2", [100.0, 0.0, 20.0, 10.0], 0.0),
            ],
        );

        let result = analyzer.compute(&table).unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.items[0].code, "A1");
        assert_eq!(result.items[0].available_stock, Some(20));
        assert_eq!(result.items[0].quantity_to_request, 35);
    }

    #[test]
    fn test_compute_reports_missing_columns() {
        let analyzer = MrpAnalyzer::new(AnalyzerConfig::default());
        let table = RawTable::new(vec!["CÓD".to_string(), "ESTQ10".to_string()], vec![]);

        match analyzer.compute(&table) {
            Err(AnalysisError::Schema { missing, .. }) => {
                assert!(missing.contains(&"ESTQ20".to_string()));
                assert!(missing.contains(&"PEDIDOS".to_string()));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_compute_rejects_negative_values() {
        let analyzer = MrpAnalyzer::new(AnalyzerConfig::default());
        let table = RawTable::new(headers(), vec![row("A1", [10.0, -3.0, 50.0, 5.0], 0.0)]);

        let err = analyzer.compute(&table).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation { ref column, .. } if column == "ESTQ20"));
    }

    #[test]
    fn test_run_missing_input_notifies_failure() {
        let observer = Arc::new(RecordingObserver::new());
        let analyzer = MrpAnalyzer::with_observer(AnalyzerConfig::default(), observer.clone());
        let request = AnalysisRequest::new(
            InputSource::file("/nonexistent/mrp.xlsx", None),
            "/nonexistent/out.xlsx",
        );

        let err = analyzer.run(&request).unwrap_err();
        assert!(matches!(err, AnalysisError::NotFound(_)));

        let events = observer.events();
        assert_eq!(events.first().map(|e| e.as_str()), Some("Started"));
        assert_eq!(events.last().map(|e| e.as_str()), Some("Failed"));
    }

    #[test]
    fn test_outcome_from_error_has_no_table() {
        let outcome: AnalysisOutcome =
            Err::<AnalysisReport, _>(AnalysisError::NotFound("x.xlsx".to_string())).into();
        assert!(!outcome.is_success());
        assert!(outcome.count.is_none());
        assert!(outcome.table.is_none());
        assert!(outcome.error.is_some());
    }
}
