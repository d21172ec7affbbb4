// ==========================================
// MRP 关键物料分析 - API 层
// ==========================================
// 职责: 提供分析入口，供命令行与宿主程序调用
// ==========================================

pub mod analyze_api;
pub mod error;
pub mod observer;

// 重导出核心类型
pub use analyze_api::{
    analyze_in_background, AnalysisOutcome, AnalysisReport, AnalysisRequest, InputSource,
    MrpAnalyzer,
};
pub use error::{AnalysisError, AnalysisResult};
pub use observer::{AnalysisEvent, AnalysisObserver, RecordingObserver, TracingObserver};
