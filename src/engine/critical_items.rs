// ==========================================
// MRP 关键物料分析 - 关键物料计算器
// ==========================================
// 规则:
//   可用库存 = ESTQ10 + ESTQ20 / 3
//   关键物料 ⇔ 可用库存 - 需求 < 安全库存（严格小于）
//   请购量 = max(0, 需求 - 可用库存 + 安全库存 - 在途)
//   STATUS = "inativo" 的行在筛选前剔除
//   输出按请购量降序（稳定排序）
// 纯计算: 无 I/O, 无随机性
// ==========================================

use crate::domain::{CriticalItem, InputRow};
use serde::{Deserialize, Serialize};

/// 二级库位换算系数（3 个二级库位单位 = 1 个一级库位单位）
pub const SECONDARY_STOCK_DIVISOR: f64 = 3.0;

/// 停用状态值（不区分大小写）
pub const INACTIVE_STATUS: &str = "inativo";

/// 可用库存
pub fn available_stock(stock_primary: f64, stock_secondary: f64) -> f64 {
    stock_primary + stock_secondary / SECONDARY_STOCK_DIVISOR
}

/// 是否为关键物料（严格小于）
pub fn is_critical(available: f64, demand: f64, safety_stock: f64) -> bool {
    available - demand < safety_stock
}

/// 请购量（未取整，下限 0）
pub fn quantity_to_request(demand: f64, available: f64, safety_stock: f64, on_order: f64) -> f64 {
    // f64::max 遇 NaN 返回另一操作数
    (demand - available + safety_stock - on_order).max(0.0)
}

/// 是否为停用物料
pub fn is_inactive(status: Option<&str>) -> bool {
    status
        .map(|s| s.trim().to_lowercase() == INACTIVE_STATUS)
        .unwrap_or(false)
}

/// 取整到最近整数（.5 取偶数）；非有限值返回 None
pub fn round_to_unit(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.round_ties_even() as i64)
    } else {
        None
    }
}

// ==========================================
// CalculationResult - 计算结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 关键物料（已按请购量降序）
    pub items: Vec<CriticalItem>,
    /// 参与计算的行数（剔除停用后）
    pub evaluated_rows: usize,
    /// 剔除的停用行数
    pub excluded_inactive: usize,
}

impl CalculationResult {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

// ==========================================
// CriticalItemCalculator
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CriticalItemCalculator;

impl CriticalItemCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算关键物料
    pub fn calculate(&self, rows: &[InputRow]) -> CalculationResult {
        // 1. 剔除停用物料
        let active: Vec<&InputRow> = rows
            .iter()
            .filter(|r| !is_inactive(r.status.as_deref()))
            .collect();
        let excluded_inactive = rows.len() - active.len();

        // 2-5. 计算、筛选、取整
        let mut items: Vec<CriticalItem> = active
            .iter()
            .filter_map(|row| self.evaluate(row))
            .collect();

        // 7. 请购量降序（sort_by 为稳定排序）
        items.sort_by(|a, b| b.quantity_to_request.cmp(&a.quantity_to_request));

        tracing::debug!(
            evaluated = active.len(),
            excluded_inactive,
            critical = items.len(),
            "关键物料计算完成"
        );

        CalculationResult {
            items,
            evaluated_rows: active.len(),
            excluded_inactive,
        }
    }

    /// 单行评估；非关键物料返回 None
    pub fn evaluate(&self, row: &InputRow) -> Option<CriticalItem> {
        // 空白数量按 0 处理
        let stock_primary = row.stock_primary.unwrap_or(0.0);
        let stock_secondary = row.stock_secondary.unwrap_or(0.0);
        let demand = row.demand.unwrap_or(0.0);
        let safety_stock = row.safety_stock.unwrap_or(0.0);
        let on_order = row.on_order.unwrap_or(0.0);

        let available = available_stock(stock_primary, stock_secondary);
        if !is_critical(available, demand, safety_stock) {
            return None;
        }

        let to_request = quantity_to_request(demand, available, safety_stock, on_order);

        // 6. 投影到输出列（非有限值 → 空白）
        Some(CriticalItem {
            code: row.code.clone(),
            supplier: row.supplier.clone(),
            description: row.description.clone(),
            stock_primary: row.stock_primary,
            stock_secondary: row.stock_secondary,
            demand: row.demand,
            safety_stock: row.safety_stock,
            on_order: row.on_order,
            available_stock: round_to_unit(available),
            quantity_to_request: round_to_unit(to_request).unwrap_or(0),
            observation: row.observation.clone(),
        })
    }
}
