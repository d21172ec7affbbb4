// ==========================================
// MRP 关键物料分析 - 数量列校验器
// ==========================================
// 两轮独立校验（按列顺序）:
//   1. 数值校验: 非空单元格必须可解析为有限数值
//   2. 非负校验: 已解析的数值必须 >= 0
// 非数值单元格不会再出现在负数报告中
// ==========================================

use crate::domain::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

/// 违规类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    NonNumeric,
    Negative,
}

/// 单列违规汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnViolation {
    pub column: String,
    pub kind: ViolationKind,
    pub rows: Vec<usize>, // 0 起，相对于校验表
}

impl From<ColumnViolation> for ImportError {
    fn from(v: ColumnViolation) -> Self {
        match v.kind {
            ViolationKind::NonNumeric => ImportError::NonNumericValues {
                column: v.column,
                rows: v.rows,
            },
            ViolationKind::Negative => ImportError::NegativeValues {
                column: v.column,
                rows: v.rows,
            },
        }
    }
}

pub struct NumericValidator;

impl NumericValidator {
    /// 扫描全部数量列，返回所有违规（不中断）
    ///
    /// 缺失的列跳过（由必需列校验负责）
    pub fn scan(&self, table: &RawTable, columns: &[String]) -> Vec<ColumnViolation> {
        let mut non_numeric = Vec::new();
        let mut negative = Vec::new();

        for column in columns {
            let Some(cells) = table.column(column) else {
                continue;
            };

            let mut bad_rows = Vec::new();
            let mut negative_rows = Vec::new();
            for (row, cell) in cells.enumerate() {
                match cell.parse_number() {
                    Err(_) => bad_rows.push(row),
                    Ok(Some(n)) if n < 0.0 => negative_rows.push(row),
                    Ok(_) => {}
                }
            }

            if !bad_rows.is_empty() {
                non_numeric.push(ColumnViolation {
                    column: column.clone(),
                    kind: ViolationKind::NonNumeric,
                    rows: bad_rows,
                });
            }
            if !negative_rows.is_empty() {
                negative.push(ColumnViolation {
                    column: column.clone(),
                    kind: ViolationKind::Negative,
                    rows: negative_rows,
                });
            }
        }

        non_numeric.extend(negative);
        non_numeric
    }

    /// 数值校验（第一轮）
    pub fn validate_numeric_columns(&self, table: &RawTable, columns: &[String]) -> ImportResult<()> {
        self.first_of_kind(table, columns, ViolationKind::NonNumeric)
    }

    /// 非负校验（第二轮）
    pub fn validate_non_negative(&self, table: &RawTable, columns: &[String]) -> ImportResult<()> {
        self.first_of_kind(table, columns, ViolationKind::Negative)
    }

    /// 依次执行两轮校验
    pub fn validate(&self, table: &RawTable, columns: &[String]) -> ImportResult<()> {
        self.validate_numeric_columns(table, columns)?;
        self.validate_non_negative(table, columns)
    }

    fn first_of_kind(
        &self,
        table: &RawTable,
        columns: &[String],
        kind: ViolationKind,
    ) -> ImportResult<()> {
        match self.scan(table, columns).into_iter().find(|v| v.kind == kind) {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }
}
