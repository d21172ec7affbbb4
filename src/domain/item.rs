// ==========================================
// MRP 关键物料分析 - 物料领域模型
// ==========================================
// InputRow: 一行 MRP 物料（校验后的规范列）
// CriticalItem: 通过关键物料筛选的派生记录
// ReportColumn: 报表输出列（固定顺序）
// ==========================================

use crate::domain::table::CellValue;
use serde::{Deserialize, Serialize};

// ==========================================
// InputRow - MRP 输入行
// ==========================================
// 数量字段为 None 表示源单元格为空白（计算时按 0 处理）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRow {
    pub code: String,                 // CÓD
    pub description: String,          // DESCRIÇÃOPROMOB
    pub stock_primary: Option<f64>,   // ESTQ10
    pub stock_secondary: Option<f64>, // ESTQ20
    pub demand: Option<f64>,          // DEMANDAMRP
    pub safety_stock: Option<f64>,    // ESTOQSEG
    pub status: Option<String>,       // STATUS（仅当 schema 含状态列）
    pub supplier: String,             // FORNECEDORPRINCIPAL
    pub on_order: Option<f64>,        // PEDIDOS
    pub observation: String,          // OBS
    pub row_index: usize,             // 行号（0 起，相对于校验表）
}

impl InputRow {
    /// 空行模板（测试与构造辅助）
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: String::new(),
            stock_primary: None,
            stock_secondary: None,
            demand: None,
            safety_stock: None,
            status: None,
            supplier: String::new(),
            on_order: None,
            observation: String::new(),
            row_index: 0,
        }
    }
}

// ==========================================
// CriticalItem - 关键物料
// ==========================================
// 原始数量保持源值（空白 → None，输出为空单元格）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalItem {
    pub code: String,
    pub supplier: String,
    pub description: String,
    pub stock_primary: Option<f64>,
    pub stock_secondary: Option<f64>,
    pub demand: Option<f64>,
    pub safety_stock: Option<f64>,
    pub on_order: Option<f64>,
    pub available_stock: Option<i64>, // 非有限结果 → None
    pub quantity_to_request: i64,     // 恒 >= 0
    pub observation: String,
}

impl CriticalItem {
    /// 读取指定输出列的值
    pub fn value(&self, column: ReportColumn) -> CellValue {
        fn number(v: Option<f64>) -> CellValue {
            match v {
                Some(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Empty,
            }
        }

        match column {
            ReportColumn::Code => CellValue::from_text(&self.code),
            ReportColumn::Supplier => CellValue::from_text(&self.supplier),
            ReportColumn::Description => CellValue::from_text(&self.description),
            ReportColumn::StockPrimary => number(self.stock_primary),
            ReportColumn::StockSecondary => number(self.stock_secondary),
            ReportColumn::Demand => number(self.demand),
            ReportColumn::SafetyStock => number(self.safety_stock),
            ReportColumn::OnOrder => number(self.on_order),
            ReportColumn::AvailableStock => number(self.available_stock.map(|v| v as f64)),
            ReportColumn::QuantityToRequest => CellValue::Number(self.quantity_to_request as f64),
            ReportColumn::Observation => CellValue::from_text(&self.observation),
        }
    }
}

// ==========================================
// ReportColumn - 报表输出列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportColumn {
    Code,
    Supplier,
    Description,
    StockPrimary,
    StockSecondary,
    Demand,
    SafetyStock,
    OnOrder,
    AvailableStock,
    QuantityToRequest,
    Observation,
}

impl ReportColumn {
    /// 输出顺序
    pub const ALL: [ReportColumn; 11] = [
        ReportColumn::Code,
        ReportColumn::Supplier,
        ReportColumn::Description,
        ReportColumn::StockPrimary,
        ReportColumn::StockSecondary,
        ReportColumn::Demand,
        ReportColumn::SafetyStock,
        ReportColumn::OnOrder,
        ReportColumn::AvailableStock,
        ReportColumn::QuantityToRequest,
        ReportColumn::Observation,
    ];

    /// 报表表头
    pub fn header(&self) -> &'static str {
        match self {
            ReportColumn::Code => "CÓD",
            ReportColumn::Supplier => "FORNECEDOR PRINCIPAL",
            ReportColumn::Description => "DESCRIÇÃOPROMOB",
            ReportColumn::StockPrimary => "ESTQ10",
            ReportColumn::StockSecondary => "ESTQ20",
            ReportColumn::Demand => "DEMANDAMRP",
            ReportColumn::SafetyStock => "ESTOQSEG",
            ReportColumn::OnOrder => "PEDIDOS",
            ReportColumn::AvailableStock => "ESTOQUE DISPONÍVEL",
            ReportColumn::QuantityToRequest => "QUANTIDADE A SOLICITAR",
            ReportColumn::Observation => "OBS",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ReportColumn::StockPrimary
                | ReportColumn::StockSecondary
                | ReportColumn::Demand
                | ReportColumn::SafetyStock
                | ReportColumn::OnOrder
                | ReportColumn::AvailableStock
                | ReportColumn::QuantityToRequest
        )
    }

    /// 按表头查找列（忽略大小写、空白与句点）
    pub fn from_header(header: &str) -> Option<ReportColumn> {
        let wanted = squash(header);
        Self::ALL.iter().copied().find(|c| squash(c.header()) == wanted)
    }
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> CriticalItem {
        CriticalItem {
            code: "A-1".to_string(),
            supplier: "ACME".to_string(),
            description: "Parafuso".to_string(),
            stock_primary: Some(5.0),
            stock_secondary: None,
            demand: Some(20.0),
            safety_stock: Some(10.0),
            on_order: Some(0.0),
            available_stock: Some(5),
            quantity_to_request: 25,
            observation: String::new(),
        }
    }

    #[test]
    fn test_value_projection() {
        let item = sample_item();
        assert_eq!(item.value(ReportColumn::Code), CellValue::Text("A-1".to_string()));
        assert_eq!(item.value(ReportColumn::StockSecondary), CellValue::Empty);
        assert_eq!(item.value(ReportColumn::QuantityToRequest), CellValue::Number(25.0));
        assert_eq!(item.value(ReportColumn::Observation), CellValue::Empty);
    }

    #[test]
    fn test_from_header() {
        assert_eq!(
            ReportColumn::from_header("quantidade a solicitar"),
            Some(ReportColumn::QuantityToRequest)
        );
        assert_eq!(ReportColumn::from_header("CÓD"), Some(ReportColumn::Code));
        assert_eq!(ReportColumn::from_header("UNKNOWN"), None);
    }

    #[test]
    fn test_column_order() {
        let headers: Vec<&str> = ReportColumn::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(headers.first(), Some(&"CÓD"));
        assert_eq!(headers[9], "QUANTIDADE A SOLICITAR");
        assert_eq!(headers.last(), Some(&"OBS"));
    }
}
