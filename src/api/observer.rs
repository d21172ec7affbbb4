// ==========================================
// MRP 关键物料分析 - 分析事件观察者
// ==========================================
// 职责: 定义分析过程事件与观察者 trait
// 说明: 分析器只向注入的观察者报告进度，不直接配置日志
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

// ==========================================
// 分析事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnalysisEvent {
    /// 开始分析
    Started { source: String },
    /// 输入表格已读取
    TableLoaded { rows: usize, columns: usize },
    /// 停用物料已剔除
    InactiveExcluded { rows: usize },
    /// 分析完成
    Completed { items: usize, output: String },
    /// 分析失败
    Failed { message: String },
}

impl AnalysisEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisEvent::Started { .. } => "Started",
            AnalysisEvent::TableLoaded { .. } => "TableLoaded",
            AnalysisEvent::InactiveExcluded { .. } => "InactiveExcluded",
            AnalysisEvent::Completed { .. } => "Completed",
            AnalysisEvent::Failed { .. } => "Failed",
        }
    }
}

// ==========================================
// AnalysisObserver Trait
// ==========================================
pub trait AnalysisObserver: Send + Sync {
    /// 接收分析事件（不得失败，不得阻塞分析）
    fn notify(&self, event: &AnalysisEvent);
}

/// 默认观察者：转发为 tracing 事件
#[derive(Debug, Clone, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn notify(&self, event: &AnalysisEvent) {
        match event {
            AnalysisEvent::Started { source } => {
                tracing::info!(source = %source, "开始分析");
            }
            AnalysisEvent::TableLoaded { rows, columns } => {
                tracing::info!(rows, columns, "输入表格已读取");
            }
            AnalysisEvent::InactiveExcluded { rows } => {
                tracing::info!(rows, "已剔除停用物料");
            }
            AnalysisEvent::Completed { items, output } => {
                tracing::info!(items, output = %output, "分析完成");
            }
            AnalysisEvent::Failed { message } => {
                tracing::error!(error = %message, "分析失败");
            }
        }
    }
}

/// 记录型观察者（保留全部事件，便于调用方事后检查）
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<AnalysisEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录事件的副本
    pub fn events(&self) -> Vec<AnalysisEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AnalysisObserver for RecordingObserver {
    fn notify(&self, event: &AnalysisEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
