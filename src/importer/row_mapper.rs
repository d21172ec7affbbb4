// ==========================================
// MRP 关键物料分析 - 行映射器
// ==========================================
// 职责: 规范化表格 → InputRow（按 SchemaConfig 取列）
// 前置: 已通过必需列与数量列校验
// ==========================================

use crate::config::SchemaConfig;
use crate::domain::{InputRow, RawTable};
use crate::importer::error::{ImportError, ImportResult};

pub struct RowMapper<'a> {
    schema: &'a SchemaConfig,
}

impl<'a> RowMapper<'a> {
    pub fn new(schema: &'a SchemaConfig) -> Self {
        Self { schema }
    }

    /// 映射全部数据行
    pub fn map_rows(&self, table: &RawTable) -> ImportResult<Vec<InputRow>> {
        let col = |name: &str| table.column_index(name);
        let text_at = |row: usize, idx: Option<usize>| -> String {
            idx.map(|i| table.cell(row, i).as_text()).unwrap_or_default()
        };

        let code = col(self.schema.code_column.as_str());
        let description = col(self.schema.description_column.as_str());
        let supplier = col(self.schema.supplier_column.as_str());
        let status = self.schema.status_column_name().and_then(col);
        let observation = self.schema.observation_column_name().and_then(col);

        let stock_primary = &self.schema.stock_primary_column;
        let stock_secondary = &self.schema.stock_secondary_column;
        let demand = &self.schema.demand_column;
        let safety_stock = &self.schema.safety_stock_column;
        let on_order = &self.schema.on_order_column;

        let mut rows = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            rows.push(InputRow {
                code: text_at(row, code),
                description: text_at(row, description),
                stock_primary: self.number_at(table, row, stock_primary)?,
                stock_secondary: self.number_at(table, row, stock_secondary)?,
                demand: self.number_at(table, row, demand)?,
                safety_stock: self.number_at(table, row, safety_stock)?,
                status: status.map(|i| table.cell(row, i).as_text()),
                supplier: text_at(row, supplier),
                on_order: self.number_at(table, row, on_order)?,
                observation: text_at(row, observation),
                row_index: row,
            });
        }

        Ok(rows)
    }

    fn number_at(&self, table: &RawTable, row: usize, column: &str) -> ImportResult<Option<f64>> {
        let Some(idx) = table.column_index(column) else {
            return Ok(None);
        };
        table.cell(row, idx).parse_number().map_err(|_| ImportError::NonNumericValues {
            column: column.to_string(),
            rows: vec![row],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    fn headers() -> Vec<String> {
        [
            "CÓD",
            "DESCRIÇÃOPROMOB",
            "ESTQ10",
            "ESTQ20",
            "DEMANDAMRP",
            "ESTOQSEG",
            "STATUS",
            "FORNECEDORPRINCIPAL",
            "PEDIDOS",
            "OBS",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    #[test]
    fn test_map_rows() {
        let table = RawTable::new(
            headers(),
            vec![vec![
                CellValue::Number(1001.0),
                CellValue::Text("Parafuso M6".to_string()),
                CellValue::Number(10.0),
                CellValue::Text("30".to_string()),
                CellValue::Number(15.0),
                CellValue::Empty,
                CellValue::Text("Ativo".to_string()),
                CellValue::Text("ACME".to_string()),
                CellValue::Number(2.0),
                CellValue::Empty,
            ]],
        );
        let schema = SchemaConfig::default();

        let rows = RowMapper::new(&schema).map_rows(&table).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.code, "1001");
        assert_eq!(row.stock_secondary, Some(30.0));
        assert_eq!(row.safety_stock, None);
        assert_eq!(row.status.as_deref(), Some("Ativo"));
        assert_eq!(row.supplier, "ACME");
        assert_eq!(row.observation, "");
    }

    #[test]
    fn test_status_absent_when_column_missing() {
        let mut hs = headers();
        hs.retain(|h| h != "STATUS");
        let table = RawTable::new(hs, vec![vec![CellValue::Number(1.0); 9]]);
        let schema = SchemaConfig::default();

        let rows = RowMapper::new(&schema).map_rows(&table).unwrap();
        assert_eq!(rows[0].status, None);
    }
}
