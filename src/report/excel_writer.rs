// ==========================================
// MRP 关键物料分析 - Excel 报表输出
// ==========================================
// 格式: 表头样式 / 冻结表头 / 全范围筛选 / 隔行底色
//       请购量非零单元格高亮 / 数值列定宽整数格式
// 历史: 同一份字节写入 <输出目录>/<历史目录>/<前缀>_YYYY-MM-DD_HH-MM-SS.xlsx
// ==========================================

use crate::domain::{CellValue, CriticalItem, ReportColumn};
use crate::report::error::ReportResult;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

/// 历史文件时间戳格式
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

const HEADER_COLOR: u32 = 0xD7E4BC;
const HIGHLIGHT_COLOR: u32 = 0xF4CCCC;
const ALTERNATE_ROW_COLOR: u32 = 0xF9F9F9;

/// 列宽
fn column_width(column: ReportColumn) -> f64 {
    match column {
        ReportColumn::Description => 40.0,
        ReportColumn::Supplier | ReportColumn::Observation => 30.0,
        ReportColumn::Code => 20.0,
        _ => 15.0,
    }
}

// ==========================================
// 报表格式集合
// ==========================================
struct ReportFormats {
    header: Format,
    integer: Format,
    text: Format,
    integer_alt: Format,
    text_alt: Format,
    highlight: Format,
}

impl ReportFormats {
    fn new() -> Self {
        let integer = Format::new()
            .set_num_format("0")
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);
        let text = Format::new().set_border(FormatBorder::Thin);

        Self {
            header: Format::new()
                .set_bold()
                .set_text_wrap()
                .set_align(FormatAlign::Top)
                .set_background_color(HEADER_COLOR)
                .set_border(FormatBorder::Thin),
            integer_alt: integer.clone().set_background_color(ALTERNATE_ROW_COLOR),
            text_alt: text.clone().set_background_color(ALTERNATE_ROW_COLOR),
            highlight: integer.clone().set_background_color(HIGHLIGHT_COLOR),
            integer,
            text,
        }
    }

    /// 选择单元格格式（row 为 1 起的数据行号）
    fn for_cell(&self, column: ReportColumn, row: u32, value: &CellValue) -> &Format {
        if column == ReportColumn::QuantityToRequest {
            if let CellValue::Number(n) = value {
                if *n != 0.0 {
                    return &self.highlight;
                }
            }
        }

        let alternate = row % 2 == 0;
        match (column.is_numeric(), alternate) {
            (true, false) => &self.integer,
            (true, true) => &self.integer_alt,
            (false, false) => &self.text,
            (false, true) => &self.text_alt,
        }
    }
}

// ==========================================
// ReportArtifacts - 输出文件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub primary: PathBuf,
    pub history: PathBuf,
}

// ==========================================
// ReportWriter
// ==========================================
#[derive(Debug, Clone)]
pub struct ReportWriter {
    sheet_name: String,
    history_dir: String,
    history_prefix: String,
}

impl ReportWriter {
    pub fn new(
        sheet_name: impl Into<String>,
        history_dir: impl Into<String>,
        history_prefix: impl Into<String>,
    ) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            history_dir: history_dir.into(),
            history_prefix: history_prefix.into(),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// 生成工作簿字节
    pub fn render(&self, items: &[CriticalItem]) -> ReportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let formats = ReportFormats::new();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;
        Self::write_sheet(worksheet, items, &formats)?;

        Ok(workbook.save_to_buffer()?)
    }

    fn write_sheet(
        worksheet: &mut Worksheet,
        items: &[CriticalItem],
        formats: &ReportFormats,
    ) -> ReportResult<()> {
        // 表头与列宽
        for (col, column) in ReportColumn::ALL.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, column.header(), &formats.header)?;
            worksheet.set_column_width(col, column_width(*column))?;
        }

        // 数据行
        for (idx, item) in items.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, column) in ReportColumn::ALL.iter().enumerate() {
                let col = col as u16;
                let value = item.value(*column);
                let format = formats.for_cell(*column, row, &value);
                match value {
                    CellValue::Number(n) => {
                        worksheet.write_number_with_format(row, col, n, format)?;
                    }
                    CellValue::Text(s) => {
                        worksheet.write_string_with_format(row, col, s, format)?;
                    }
                    CellValue::Empty => {
                        worksheet.write_blank(row, col, format)?;
                    }
                }
            }
        }

        // 冻结表头 + 全范围筛选
        let last_col = (ReportColumn::ALL.len() - 1) as u16;
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofilter(0, 0, items.len() as u32, last_col)?;

        Ok(())
    }

    /// 仅写出单个文件（导出用，不生成历史）
    pub fn write(&self, items: &[CriticalItem], output: &Path) -> ReportResult<()> {
        let bytes = self.render(items)?;
        fs::write(output, bytes)?;
        tracing::info!(path = %output.display(), rows = items.len(), "Excel 文件已保存");
        Ok(())
    }

    /// 历史文件路径
    pub fn history_path(&self, output: &Path, timestamp: NaiveDateTime) -> PathBuf {
        let dir = output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.history_dir);
        dir.join(format!(
            "{}_{}.xlsx",
            self.history_prefix,
            timestamp.format(HISTORY_TIMESTAMP_FORMAT)
        ))
    }

    /// 写出主报表 + 历史副本
    ///
    /// 主报表先写入临时文件，历史副本成功后再改名，
    /// 历史写入失败时不会留下半成品主报表。
    pub fn write_with_history(
        &self,
        items: &[CriticalItem],
        output: &Path,
        timestamp: NaiveDateTime,
    ) -> ReportResult<ReportArtifacts> {
        let bytes = self.render(items)?;

        let staging = staging_path(output);
        fs::write(&staging, &bytes)?;

        let history = self.history_path(output, timestamp);
        let history_result = history
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| fs::write(&history, &bytes));

        if let Err(e) = history_result {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&staging, output) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        tracing::info!(path = %output.display(), rows = items.len(), "Excel 文件已保存");
        tracing::info!(path = %history.display(), "历史副本已保存");

        Ok(ReportArtifacts {
            primary: output.to_path_buf(),
            history,
        })
    }
}

/// 主报表的临时文件（同目录，保证 rename 原子性）
fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "report.xlsx".to_string());
    output.with_file_name(format!(".{name}.tmp"))
}
