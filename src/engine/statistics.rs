// ==========================================
// MRP 关键物料分析 - 结果统计
// ==========================================
// 总条目数 / 请购总量 / 平均请购量（2 位小数）/ 最常见供应商
// ==========================================

use crate::domain::CriticalItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub total_items: usize,
    pub total_quantity: i64,
    pub average_quantity: f64,
    pub top_supplier: Option<String>,
}

impl ReportStatistics {
    pub fn from_items(items: &[CriticalItem]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let total_quantity: i64 = items.iter().map(|i| i.quantity_to_request).sum();
        let average = total_quantity as f64 / items.len() as f64;

        Self {
            total_items: items.len(),
            total_quantity,
            average_quantity: (average * 100.0).round() / 100.0,
            top_supplier: top_supplier(items),
        }
    }
}

/// 出现次数最多的非空供应商；并列时取最先出现者
fn top_supplier(items: &[CriticalItem]) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, item) in items.iter().enumerate() {
        let supplier = item.supplier.trim();
        if supplier.is_empty() {
            continue;
        }
        counts.entry(supplier).or_insert((0, idx)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(supplier, _)| supplier.to_string())
}
