// ==========================================
// MRP 关键物料分析 - 关系查询数据源
// ==========================================
// 职责: 只读执行 SQL 查询，结果集 → RawTable
// 存储: SQLite（rusqlite）
// ==========================================

use crate::domain::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::table_parser_trait::QuerySource;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 以只读方式打开 SQLite 连接
pub fn open_readonly_connection(db_path: &Path) -> ImportResult<Connection> {
    if !db_path.exists() {
        return Err(ImportError::FileNotFound(db_path.display().to_string()));
    }
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(conn)
}

// ==========================================
// SqliteQuerySource
// ==========================================
pub struct SqliteQuerySource {
    db_path: PathBuf,
}

impl SqliteQuerySource {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn to_cell(value: ValueRef<'_>) -> CellValue {
        match value {
            ValueRef::Null => CellValue::Empty,
            ValueRef::Integer(i) => CellValue::Number(i as f64),
            ValueRef::Real(f) => CellValue::Number(f),
            ValueRef::Text(bytes) => CellValue::from_text(&String::from_utf8_lossy(bytes)),
            // 二进制值保留为文本标记，由数值校验报告所在行
            ValueRef::Blob(bytes) => CellValue::Text(format!("<blob {} bytes>", bytes.len())),
        }
    }
}

impl QuerySource for SqliteQuerySource {
    fn fetch_table(&self, query: &str) -> ImportResult<RawTable> {
        let conn = open_readonly_connection(&self.db_path)?;
        let mut stmt = conn.prepare(query)?;

        let headers: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|name| name.trim().to_string())
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        let mut result = stmt.query([])?;
        while let Some(row) = result.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(Self::to_cell(row.get_ref(idx)?));
            }
            rows.push(cells);
        }

        tracing::debug!(
            db = %self.db_path.display(),
            columns = width,
            rows = rows.len(),
            "查询结果读取完成"
        );

        Ok(RawTable::new(headers, rows))
    }
}
