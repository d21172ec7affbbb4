// ==========================================
// MRP 关键物料分析 - 前后两次分析对比
// ==========================================
// 按物料编码合并（并集，按编码排序）
// 状态: New（仅本次）/ Removed（仅上次）/ Changed / Unchanged
// ==========================================

use crate::domain::CriticalItem;
use crate::i18n::t;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("对比分析为空: {0}")]
    EmptyAnalysis(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonStatus {
    New,
    Removed,
    Changed,
    Unchanged,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::New => "New",
            ComparisonStatus::Removed => "Removed",
            ComparisonStatus::Changed => "Changed",
            ComparisonStatus::Unchanged => "Unchanged",
        }
    }

    /// 本地化标签
    pub fn label(&self) -> String {
        let key = match self {
            ComparisonStatus::New => "compare.status.new",
            ComparisonStatus::Removed => "compare.status.removed",
            ComparisonStatus::Changed => "compare.status.changed",
            ComparisonStatus::Unchanged => "compare.status.unchanged",
        };
        t(key)
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub code: String,
    pub description: String,
    pub supplier: String,
    pub previous_quantity: i64,
    pub current_quantity: i64,
    pub difference: i64,
    pub status: ComparisonStatus,
}

/// 编码排序：数字编码按数值排在前，其余按字符串
fn compare_codes(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// 对比两次分析结果
pub fn compare_analyses(
    before: &[CriticalItem],
    after: &[CriticalItem],
) -> Result<Vec<ComparisonRow>, ComparisonError> {
    if before.is_empty() {
        return Err(ComparisonError::EmptyAnalysis("before".to_string()));
    }
    if after.is_empty() {
        return Err(ComparisonError::EmptyAnalysis("after".to_string()));
    }

    // 同一编码重复出现时取第一条
    let index = |items: &[CriticalItem]| {
        let mut map: BTreeMap<String, CriticalItem> = BTreeMap::new();
        for item in items {
            map.entry(item.code.clone()).or_insert_with(|| item.clone());
        }
        map
    };
    let before_map = index(before);
    let after_map = index(after);

    let mut codes: Vec<&String> = before_map.keys().chain(after_map.keys()).collect();
    codes.sort_by(|a, b| compare_codes(a, b));
    codes.dedup();

    let rows = codes
        .into_iter()
        .map(|code| {
            let prev = before_map.get(code);
            let curr = after_map.get(code);
            // 描述/供应商优先取本次
            let source = curr.or(prev);

            let previous_quantity = prev.map(|i| i.quantity_to_request).unwrap_or(0);
            let current_quantity = curr.map(|i| i.quantity_to_request).unwrap_or(0);

            let status = match (prev, curr) {
                (None, _) => ComparisonStatus::New,
                (_, None) => ComparisonStatus::Removed,
                _ if previous_quantity != current_quantity => ComparisonStatus::Changed,
                _ => ComparisonStatus::Unchanged,
            };

            ComparisonRow {
                code: code.clone(),
                description: source.map(|i| i.description.clone()).unwrap_or_default(),
                supplier: source.map(|i| i.supplier.clone()).unwrap_or_default(),
                previous_quantity,
                current_quantity,
                difference: current_quantity - previous_quantity,
                status,
            }
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, supplier: &str, qty: i64) -> CriticalItem {
        CriticalItem {
            code: code.to_string(),
            supplier: supplier.to_string(),
            description: format!("desc {code}"),
            stock_primary: None,
            stock_secondary: None,
            demand: None,
            safety_stock: None,
            on_order: None,
            available_stock: Some(0),
            quantity_to_request: qty,
            observation: String::new(),
        }
    }

    #[test]
    fn test_compare_statuses() {
        let before = vec![item("A", "OLD", 10), item("B", "X", 5), item("C", "X", 7)];
        let after = vec![item("A", "NEW", 10), item("B", "X", 8), item("D", "Y", 3)];

        let rows = compare_analyses(&before, &after).unwrap();
        let summary: Vec<(&str, ComparisonStatus, i64)> = rows
            .iter()
            .map(|r| (r.code.as_str(), r.status, r.difference))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("A", ComparisonStatus::Unchanged, 0),
                ("B", ComparisonStatus::Changed, 3),
                ("C", ComparisonStatus::Removed, -7),
                ("D", ComparisonStatus::New, 3),
            ]
        );
        // 描述/供应商取本次
        assert_eq!(rows[0].supplier, "NEW");
        assert_eq!(rows[2].supplier, "X");
        assert_eq!(rows[3].previous_quantity, 0);
    }

    #[test]
    fn test_numeric_codes_sorted_by_value() {
        let before = vec![item("1001", "S", 4), item("B-7", "S", 2)];
        let after = vec![item("999", "S", 1), item("20", "S", 3), item("A-1", "S", 5)];

        let rows = compare_analyses(&before, &after).unwrap();
        let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["20", "999", "1001", "A-1", "B-7"]);
    }

    #[test]
    fn test_compare_codes_order() {
        assert_eq!(compare_codes("999", "1001"), Ordering::Less);
        assert_eq!(compare_codes("10", "10.0"), Ordering::Less);
        assert_eq!(compare_codes("10", "10"), Ordering::Equal);
        assert_eq!(compare_codes("ABC", "123"), Ordering::Greater);
    }

    #[test]
    fn test_compare_rejects_empty() {
        let items = vec![item("A", "S", 1)];
        assert_eq!(
            compare_analyses(&[], &items),
            Err(ComparisonError::EmptyAnalysis("before".to_string()))
        );
        assert!(compare_analyses(&items, &[]).is_err());
    }
}
