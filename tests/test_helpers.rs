// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造 MRP 计算表夹具（Excel / CSV / SQLite）
// ==========================================
#![allow(dead_code)]

use rusqlite::Connection;
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;

/// 原始工作簿中的工作表名
pub const MRP_SHEET: &str = "Cálculo MRP";

/// 原始工作簿表头（含空格与句点，需经规范化）
pub const MRP_HEADERS: [&str; 9] = [
    "CÓD",
    "DESCRIÇÃO PROMOB",
    "ESTQ10",
    "ESTQ20",
    "DEMANDA MRP",
    "ESTOQ. SEG.",
    "FORNECEDOR PRINCIPAL",
    "PEDIDOS",
    "OBS",
];

/// 一行 MRP 计算表数据
#[derive(Debug, Clone)]
pub struct MrpRow {
    pub code: String,
    pub description: String,
    pub stock10: Option<f64>,
    pub stock20: Option<f64>,
    pub demand: Option<f64>,
    pub safety: Option<f64>,
    pub supplier: String,
    pub on_order: Option<f64>,
    pub obs: String,
    pub status: Option<String>,
}

impl MrpRow {
    /// 数量依次为 ESTQ10, ESTQ20, DEMANDA MRP, ESTOQ. SEG., PEDIDOS
    pub fn new(code: &str, stock10: f64, stock20: f64, demand: f64, safety: f64, on_order: f64) -> Self {
        Self {
            code: code.to_string(),
            description: format!("Peça {}", code),
            stock10: Some(stock10),
            stock20: Some(stock20),
            demand: Some(demand),
            safety: Some(safety),
            supplier: "ACME Ltda".to_string(),
            on_order: Some(on_order),
            obs: String::new(),
            status: None,
        }
    }

    pub fn supplier(mut self, supplier: &str) -> Self {
        self.supplier = supplier.to_string();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn blank_on_order(mut self) -> Self {
        self.on_order = None;
        self
    }

    fn quantities(&self) -> [Option<f64>; 4] {
        [self.stock10, self.stock20, self.demand, self.safety]
    }
}

/// 场景一：边界行（20 - 15 = 5，不小于 5）
pub fn boundary_row() -> MrpRow {
    MrpRow::new("P-100", 10.0, 30.0, 15.0, 5.0, 2.0)
}

/// 场景二：关键行（请购量 25）
pub fn critical_row() -> MrpRow {
    MrpRow::new("P-200", 5.0, 0.0, 20.0, 10.0, 0.0)
}

fn headers(rows: &[MrpRow], skip: &[&str]) -> Vec<String> {
    let mut headers: Vec<String> = MRP_HEADERS
        .iter()
        .filter(|h| !skip.contains(h))
        .map(|h| h.to_string())
        .collect();
    if rows.iter().any(|r| r.status.is_some()) {
        headers.push("STATUS".to_string());
    }
    headers
}

// ==========================================
// Excel 夹具
// ==========================================

/// 写出 MRP 工作簿
pub fn write_mrp_workbook(path: &Path, sheet: &str, rows: &[MrpRow]) -> Result<(), Box<dyn Error>> {
    write_mrp_workbook_without(path, sheet, rows, &[])
}

/// 写出缺少指定列的 MRP 工作簿
pub fn write_mrp_workbook_without(
    path: &Path,
    sheet: &str,
    rows: &[MrpRow],
    skip: &[&str],
) -> Result<(), Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    let headers = headers(rows, skip);
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = idx as u32 + 1;
        for (col, header) in headers.iter().enumerate() {
            let col = col as u16;
            match header.as_str() {
                "CÓD" => {
                    worksheet.write_string(r, col, &row.code)?;
                }
                "DESCRIÇÃO PROMOB" => {
                    worksheet.write_string(r, col, &row.description)?;
                }
                "FORNECEDOR PRINCIPAL" => {
                    worksheet.write_string(r, col, &row.supplier)?;
                }
                "OBS" if !row.obs.is_empty() => {
                    worksheet.write_string(r, col, &row.obs)?;
                }
                "STATUS" => {
                    if let Some(status) = &row.status {
                        worksheet.write_string(r, col, status)?;
                    }
                }
                other => {
                    if let Some(value) = number_for(row, other) {
                        worksheet.write_number(r, col, value)?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn number_for(row: &MrpRow, header: &str) -> Option<f64> {
    let [stock10, stock20, demand, safety] = row.quantities();
    match header {
        "ESTQ10" => stock10,
        "ESTQ20" => stock20,
        "DEMANDA MRP" => demand,
        "ESTOQ. SEG." => safety,
        "PEDIDOS" => row.on_order,
        _ => None,
    }
}

// ==========================================
// CSV 夹具
// ==========================================

/// 写出 MRP CSV 文件
pub fn write_mrp_csv(path: &Path, rows: &[MrpRow]) -> Result<(), Box<dyn Error>> {
    let fmt = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();

    let mut content = MRP_HEADERS.join(",");
    content.push('\n');
    for row in rows {
        writeln!(
            content,
            "{},{},{},{},{},{},{},{},{}",
            row.code,
            row.description,
            fmt(row.stock10),
            fmt(row.stock20),
            fmt(row.demand),
            fmt(row.safety),
            row.supplier,
            fmt(row.on_order),
            row.obs
        )?;
    }

    std::fs::write(path, content)?;
    Ok(())
}

// ==========================================
// SQLite 夹具
// ==========================================

/// 创建含 mrp 表的 SQLite 数据库
pub fn create_mrp_db(path: &Path, rows: &[MrpRow]) -> Result<(), Box<dyn Error>> {
    let conn = Connection::open(path)?;
    conn.execute(
        r#"
        CREATE TABLE mrp (
            "CÓD" TEXT NOT NULL,
            "DESCRIÇÃO PROMOB" TEXT,
            "ESTQ10" REAL,
            "ESTQ20" REAL,
            "DEMANDA MRP" REAL,
            "ESTOQ. SEG." REAL,
            "FORNECEDOR PRINCIPAL" TEXT,
            "PEDIDOS" REAL,
            "OBS" TEXT
        )
        "#,
        [],
    )?;

    for row in rows {
        conn.execute(
            "INSERT INTO mrp VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.code,
                row.description,
                row.stock10,
                row.stock20,
                row.demand,
                row.safety,
                row.supplier,
                row.on_order,
                row.obs,
            ],
        )?;
    }

    Ok(())
}
