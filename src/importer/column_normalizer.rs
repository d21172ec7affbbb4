// ==========================================
// MRP 关键物料分析 - 列名规范化与必需列校验
// ==========================================
// 规范化: TRIM + 去除内部空白 + 去除句点 + UPPER，再解析别名
// 校验: 收集全部缺失的必需列（不在第一个缺失处中断）
// ==========================================

use crate::config::SchemaConfig;
use crate::domain::RawTable;
use crate::importer::error::{ImportError, ImportResult};

/// 规范化单个列名
///
/// # 示例
/// - " Descrição Promob. " → "DESCRIÇÃOPROMOB"
/// - "Estoq. Seg." → "ESTOQSEG"
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect::<String>()
        .to_uppercase()
}

pub struct ColumnNormalizer<'a> {
    schema: &'a SchemaConfig,
}

impl<'a> ColumnNormalizer<'a> {
    pub fn new(schema: &'a SchemaConfig) -> Self {
        Self { schema }
    }

    /// 规范化全部列名（返回新表，源表不变）
    pub fn normalize(&self, table: &RawTable) -> RawTable {
        let headers = table
            .headers()
            .iter()
            .map(|h| {
                let normalized = normalize_header(h);
                self.schema.resolve_alias(&normalized).to_string()
            })
            .collect();

        table.with_headers(headers)
    }

    /// 校验必需列（表头需已规范化）
    ///
    /// # 返回
    /// - Err(MissingColumns): 列出全部缺失列（按 schema 顺序）
    pub fn require_columns(&self, table: &RawTable) -> ImportResult<()> {
        let missing: Vec<String> = self
            .schema
            .required_columns()
            .into_iter()
            .filter(|col| !table.has_column(col))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns {
                missing,
                available: table.headers().to_vec(),
            })
        }
    }

    /// 规范化 + 必需列校验
    pub fn normalize_and_check(&self, table: &RawTable) -> ImportResult<RawTable> {
        let normalized = self.normalize(table);
        self.require_columns(&normalized)?;
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    fn table_with_headers(headers: &[&str]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            vec![vec![CellValue::Empty; headers.len()]],
        )
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  cód "), "CÓD");
        assert_eq!(normalize_header("Descrição Promob"), "DESCRIÇÃOPROMOB");
        assert_eq!(normalize_header("Estoq. Seg."), "ESTOQSEG");
        assert_eq!(normalize_header("Fornecedor  Principal"), "FORNECEDORPRINCIPAL");
        assert_eq!(normalize_header("Demanda\tMRP"), "DEMANDAMRP");
    }

    #[test]
    fn test_normalize_resolves_aliases_and_keeps_source() {
        let schema = SchemaConfig::default();
        let source = table_with_headers(&["Estoq 10", "Estoq. 20", "Pedidos"]);

        let normalized = ColumnNormalizer::new(&schema).normalize(&source);

        assert_eq!(normalized.headers(), &["ESTQ10", "ESTQ20", "PEDIDOS"]);
        assert_eq!(source.headers()[0], "Estoq 10");
    }

    #[test]
    fn test_require_columns_reports_every_missing() {
        let schema = SchemaConfig::default();
        let table = table_with_headers(&[
            "CÓD",
            "DESCRIÇÃOPROMOB",
            "ESTQ10",
            "DEMANDAMRP",
            "ESTOQSEG",
            "FORNECEDORPRINCIPAL",
            "OBS",
        ]);

        let err = ColumnNormalizer::new(&schema)
            .require_columns(&table)
            .unwrap_err();

        match err {
            ImportError::MissingColumns { missing, available } => {
                assert_eq!(missing, vec!["ESTQ20", "PEDIDOS"]);
                assert_eq!(available.len(), 7);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_and_check_ok() {
        let schema = SchemaConfig::default();
        let table = table_with_headers(&[
            "Cód",
            "Descrição Promob",
            "Estq10",
            "Estq20",
            "Demanda MRP",
            "Estoq. Seg.",
            "Fornecedor Principal",
            "Pedidos",
            "Obs",
        ]);

        let normalized = ColumnNormalizer::new(&schema)
            .normalize_and_check(&table)
            .unwrap();
        assert!(normalized.has_column("ESTOQSEG"));
    }
}
