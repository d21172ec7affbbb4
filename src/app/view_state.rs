// ==========================================
// MRP 关键物料分析 - 结果表视图状态
// ==========================================
// 职责: 结果表的筛选 / 排序 / 分页
// 说明: 显式值对象，由调用方持有，不使用全局状态
// 规则: 筛选条件变化时回到第 0 页；翻页限制在有效范围内
// ==========================================

use crate::domain::{CellValue, CriticalItem, ReportColumn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// RowFilter - 行筛选条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFilter {
    /// 文本匹配的列（None 表示任意列）
    pub column: Option<ReportColumn>,
    /// 包含文本（不区分大小写）
    pub contains: Option<String>,
    /// 请购量下限（含）
    pub min_quantity: Option<i64>,
    /// 请购量上限（含）
    pub max_quantity: Option<i64>,
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.contains.as_deref().map_or(true, str::is_empty)
            && self.min_quantity.is_none()
            && self.max_quantity.is_none()
    }

    pub fn matches(&self, item: &CriticalItem) -> bool {
        if let Some(min) = self.min_quantity {
            if item.quantity_to_request < min {
                return false;
            }
        }
        if let Some(max) = self.max_quantity {
            if item.quantity_to_request > max {
                return false;
            }
        }

        let needle = match self.contains.as_deref() {
            Some(n) if !n.is_empty() => n.to_lowercase(),
            _ => return true,
        };
        let hit = |column: ReportColumn| item.value(column).as_text().to_lowercase().contains(&needle);

        match self.column {
            Some(column) => hit(column),
            None => ReportColumn::ALL.iter().any(|c| hit(*c)),
        }
    }
}

// ==========================================
// SortKey - 排序键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: ReportColumn,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: ReportColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    pub fn descending(column: ReportColumn) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    fn compare(&self, a: &CriticalItem, b: &CriticalItem) -> Ordering {
        let ordering = compare_cells(&a.value(self.column), &b.value(self.column));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// 单元格排序：空值在前，数值按大小，文本不区分大小写
fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        (CellValue::Empty, _) => Ordering::Less,
        (_, CellValue::Empty) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
        (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
        (CellValue::Text(x), CellValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
    }
}

// ==========================================
// ViewState - 视图状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    page_size: usize,
    current_page: usize,
    filter: RowFilter,
    sort: Option<SortKey>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(50)
    }
}

impl ViewState {
    /// page_size 为 0 时按 1 处理
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
            filter: RowFilter::default(),
            sort: None,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn filter(&self) -> &RowFilter {
        &self.filter
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// 更新筛选条件（回到第 0 页）
    pub fn set_filter(&mut self, filter: RowFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.current_page = 0;
        }
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(RowFilter::default());
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
    }

    /// 筛选 + 排序（稳定排序，相等行保持原顺序）
    pub fn apply(&self, items: &[CriticalItem]) -> Vec<CriticalItem> {
        let mut rows: Vec<CriticalItem> = items
            .iter()
            .filter(|item| self.filter.matches(item))
            .cloned()
            .collect();

        if let Some(key) = self.sort {
            rows.sort_by(|a, b| key.compare(a, b));
        }
        rows
    }

    /// 总页数（无数据时为 0）
    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    /// 当前页的行
    pub fn page<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = (self.current_page * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }

    /// 跳转到指定页（超出范围时取最后一页）
    pub fn go_to_page(&mut self, page: usize, total_rows: usize) {
        let last = self.total_pages(total_rows).saturating_sub(1);
        self.current_page = page.min(last);
    }

    /// 下一页；已在最后一页时返回 false
    pub fn next_page(&mut self, total_rows: usize) -> bool {
        if self.current_page + 1 < self.total_pages(total_rows) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// 上一页；已在第 0 页时返回 false
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }
}
