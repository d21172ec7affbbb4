// ==========================================
// MRP 关键物料分析 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.ods) / CSV (.csv)
// 输出: RawTable（首行为表头）
// ==========================================

use crate::domain::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_parser_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path, _sheet: Option<&str>) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record.iter().map(CellValue::from_text).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }

            rows.push(row);
        }

        Ok(RawTable::new(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn to_cell(data: &Data) -> CellValue {
        match data {
            Data::Empty => CellValue::Empty,
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::from_text(s),
            other => CellValue::from_text(&other.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path, sheet: Option<&str>) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;

        // 定位工作表（未指定时取第一个）
        let sheet_names = workbook.sheet_names();
        let sheet_name = match sheet {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(ImportError::SheetNotFound {
                        sheet: name.to_string(),
                        available: sheet_names,
                    });
                }
                name.to_string()
            }
            None => sheet_names.first().cloned().ok_or_else(|| {
                ImportError::ExcelParseError("Excel 文件无工作表".to_string())
            })?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = match rows_iter.next() {
            Some(row) => row,
            None => return Ok(RawTable::default()),
        };

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in rows_iter {
            let row: Vec<CellValue> = data_row.iter().map(Self::to_cell).collect();

            // 跳过完全空白的行
            if row.iter().all(CellValue::is_blank) {
                continue;
            }

            rows.push(row);
        }

        tracing::debug!(
            sheet = %sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "Excel 工作表读取完成"
        );

        Ok(RawTable::new(headers, rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, sheet: Option<&str>) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        ensure_exists(path)?;

        let ext = extension_of(path);
        match ext.as_str() {
            "csv" => CsvParser.parse_table(path, sheet),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_table(path, sheet),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
