// ==========================================
// MRP 关键物料分析 - CSV 导出
// ==========================================

use crate::domain::{CriticalItem, ReportColumn};
use crate::report::error::ReportResult;
use csv::Writer;
use std::io::Write;
use std::path::Path;

/// 写出 CSV（列与 Excel 报表一致）
pub fn write_csv<W: Write>(items: &[CriticalItem], writer: W) -> ReportResult<()> {
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer.write_record(ReportColumn::ALL.iter().map(|c| c.header()))?;
    for item in items {
        csv_writer.write_record(ReportColumn::ALL.iter().map(|c| item.value(*c).as_text()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 导出 CSV 文件
pub fn export_csv(items: &[CriticalItem], path: &Path) -> ReportResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(items, file)?;
    tracing::info!(path = %path.display(), rows = items.len(), "CSV 文件已保存");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv() {
        let item = CriticalItem {
            code: "A1".to_string(),
            supplier: "ACME, Ltda".to_string(),
            description: "Parafuso".to_string(),
            stock_primary: Some(5.0),
            stock_secondary: Some(1.5),
            demand: Some(20.0),
            safety_stock: Some(10.0),
            on_order: None,
            available_stock: Some(6),
            quantity_to_request: 24,
            observation: String::new(),
        };

        let mut buffer = Vec::new();
        write_csv(&[item], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "CÓD,FORNECEDOR PRINCIPAL,DESCRIÇÃOPROMOB,ESTQ10,ESTQ20,DEMANDAMRP,ESTOQSEG,PEDIDOS,ESTOQUE DISPONÍVEL,QUANTIDADE A SOLICITAR,OBS"
        );
        assert_eq!(lines[1], "A1,\"ACME, Ltda\",Parafuso,5,1.5,20,10,,6,24,");
    }
}
