// ==========================================
// MRP 关键物料分析 - 原始表格模型
// ==========================================
// 职责: 数据源（Excel / CSV / SQLite 查询）的统一内存表示
// 结构: 有序列名 + 行优先的单元格矩阵
// ==========================================

use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
// Excel 数值保持数值类型；CSV/SQLite 文本在校验时按需解析
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 从原始文本构造（空白 → Empty）
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// 是否为空白单元格
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 解析为数值
    ///
    /// # 返回
    /// - Ok(None): 空白
    /// - Ok(Some(f64)): 有限数值
    /// - Err(String): 无法解析的原始文本（含 NaN / 无穷）
    pub fn parse_number(&self) -> Result<Option<f64>, String> {
        match self {
            CellValue::Empty => Ok(None),
            CellValue::Number(n) if n.is_finite() => Ok(Some(*n)),
            CellValue::Number(n) => Err(n.to_string()),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Some(n)),
                    _ => Err(trimmed.to_string()),
                }
            }
        }
    }

    /// 文本表示（整数值不带小数点）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// 数值格式化：整数去掉 ".0"，非有限值输出空串
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        String::new()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

// ==========================================
// RawTable - 原始表格
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// 创建表格；短行以 Empty 补齐，超出表头的单元格被截断
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按列名查找列下标（重名时取第一列）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// 读取单元格（越界返回 Empty）
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// 按列名遍历某一列
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// 以新表头复制表格（源表不变）
    pub fn with_headers(&self, headers: Vec<String>) -> Self {
        Self::new(headers, self.rows.clone())
    }
}
