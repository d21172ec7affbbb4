// ==========================================
// MRP 关键物料分析 - 报表回读
// ==========================================
// 职责: 读取已生成的报表（.xlsx / .csv）→ Vec<CriticalItem>
// 用途: 前后对比、结果浏览与再导出
// ==========================================

use crate::domain::{CellValue, CriticalItem, RawTable, ReportColumn};
use crate::engine::critical_items::round_to_unit;
use crate::importer::UniversalFileParser;
use crate::report::error::{ReportError, ReportResult};
use std::collections::HashMap;
use std::path::Path;

/// 读取报表文件
///
/// # 参数
/// - path: 报表路径
/// - sheet: 工作表名（None 取第一个）
pub fn read_report(path: &Path, sheet: Option<&str>) -> ReportResult<Vec<CriticalItem>> {
    let table = UniversalFileParser.parse(path, sheet)?;
    items_from_table(&table)
}

/// 原始表格 → 关键物料（按表头识别列）
pub fn items_from_table(table: &RawTable) -> ReportResult<Vec<CriticalItem>> {
    let columns: HashMap<ReportColumn, usize> = table
        .headers()
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| ReportColumn::from_header(h).map(|c| (c, idx)))
        .fold(HashMap::new(), |mut acc, (c, idx)| {
            acc.entry(c).or_insert(idx);
            acc
        });

    for required in [ReportColumn::Code, ReportColumn::QuantityToRequest] {
        if !columns.contains_key(&required) {
            return Err(ReportError::InvalidReport(format!(
                "缺少列 {}",
                required.header()
            )));
        }
    }

    let cell = |row: usize, column: ReportColumn| -> CellValue {
        columns
            .get(&column)
            .map(|idx| table.cell(row, *idx).clone())
            .unwrap_or(CellValue::Empty)
    };

    let number = |row: usize, column: ReportColumn| -> ReportResult<Option<f64>> {
        cell(row, column).parse_number().map_err(|raw| {
            ReportError::InvalidReport(format!(
                "第 {} 行 {} 不是数值: {}",
                row,
                column.header(),
                raw
            ))
        })
    };

    let mut items = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        items.push(CriticalItem {
            code: cell(row, ReportColumn::Code).as_text(),
            supplier: cell(row, ReportColumn::Supplier).as_text(),
            description: cell(row, ReportColumn::Description).as_text(),
            stock_primary: number(row, ReportColumn::StockPrimary)?,
            stock_secondary: number(row, ReportColumn::StockSecondary)?,
            demand: number(row, ReportColumn::Demand)?,
            safety_stock: number(row, ReportColumn::SafetyStock)?,
            on_order: number(row, ReportColumn::OnOrder)?,
            available_stock: number(row, ReportColumn::AvailableStock)?.and_then(round_to_unit),
            quantity_to_request: number(row, ReportColumn::QuantityToRequest)?
                .and_then(round_to_unit)
                .unwrap_or(0),
            observation: cell(row, ReportColumn::Observation).as_text(),
        });
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[test]
    fn test_items_from_table() {
        let t = table(
            &["CÓD", "QUANTIDADE A SOLICITAR", "Fornecedor Principal", "ESTOQUE DISPONÍVEL"],
            vec![vec![
                CellValue::Text("A1".to_string()),
                CellValue::Number(25.0),
                CellValue::Text("ACME".to_string()),
                CellValue::Empty,
            ]],
        );

        let items = items_from_table(&t).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "A1");
        assert_eq!(items[0].quantity_to_request, 25);
        assert_eq!(items[0].supplier, "ACME");
        assert_eq!(items[0].available_stock, None);
    }

    #[test]
    fn test_missing_quantity_column() {
        let t = table(&["CÓD"], vec![]);
        let err = items_from_table(&t).unwrap_err();
        assert!(matches!(err, ReportError::InvalidReport(ref m) if m.contains("QUANTIDADE A SOLICITAR")));
    }

    #[test]
    fn test_non_numeric_quantity() {
        let t = table(
            &["CÓD", "QUANTIDADE A SOLICITAR"],
            vec![vec![
                CellValue::Text("A1".to_string()),
                CellValue::Text("muito".to_string()),
            ]],
        );
        assert!(items_from_table(&t).is_err());
    }
}
