// ==========================================
// MRP 关键物料分析 - 导入层
// ==========================================
// 职责: 外部数据读取、列名规范化、数量列校验、行映射
// 支持: Excel, CSV, SQLite 查询
// ==========================================

// 模块声明
pub mod column_normalizer;
pub mod db_source;
pub mod error;
pub mod file_parser;
pub mod numeric_validator;
pub mod row_mapper;
pub mod table_parser_trait;

// 重导出核心类型
pub use column_normalizer::{normalize_header, ColumnNormalizer};
pub use db_source::SqliteQuerySource;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use numeric_validator::{ColumnViolation, NumericValidator, ViolationKind};
pub use row_mapper::RowMapper;

// 重导出 Trait 接口
pub use table_parser_trait::{FileParser, QuerySource};
