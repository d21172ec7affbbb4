// ==========================================
// MRP 关键物料分析 - 分析配置
// ==========================================
// SchemaConfig: 规范列名 + 可选列（状态/备注）+ 列名别名
// AnalyzerConfig: 输出路径、历史目录、默认工作表、分页等
// 存储: ~/.mrp_analyzer/config.json
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置目录名（位于用户主目录下）
pub const CONFIG_DIR_NAME: &str = ".mrp_analyzer";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("无法定位用户主目录")]
    HomeDirUnavailable,
}

// ==========================================
// ColumnSpec - 可选列定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// 规范列名（大写、无空白）
    pub name: String,

    /// true: 缺失即为 schema 错误；false: 存在时才使用
    #[serde(default)]
    pub required: bool,
}

impl ColumnSpec {
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
        }
    }

    pub fn if_present(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
        }
    }
}

// ==========================================
// SchemaConfig - 输入列结构
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub code_column: String,
    pub description_column: String,
    pub stock_primary_column: String,
    pub stock_secondary_column: String,
    pub demand_column: String,
    pub safety_stock_column: String,
    pub supplier_column: String,
    pub on_order_column: String,

    /// 状态列（值为 "inativo" 的行在筛选前剔除）
    pub status_column: Option<ColumnSpec>,

    /// 备注列
    pub observation_column: Option<ColumnSpec>,

    /// 别名 → 规范列名（键为规范化后的列名）
    pub aliases: BTreeMap<String, String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert("ESTOQ10".to_string(), "ESTQ10".to_string());
        aliases.insert("ESTOQ20".to_string(), "ESTQ20".to_string());
        aliases.insert("COD".to_string(), "CÓD".to_string());

        Self {
            code_column: "CÓD".to_string(),
            description_column: "DESCRIÇÃOPROMOB".to_string(),
            stock_primary_column: "ESTQ10".to_string(),
            stock_secondary_column: "ESTQ20".to_string(),
            demand_column: "DEMANDAMRP".to_string(),
            safety_stock_column: "ESTOQSEG".to_string(),
            supplier_column: "FORNECEDORPRINCIPAL".to_string(),
            on_order_column: "PEDIDOS".to_string(),
            status_column: Some(ColumnSpec::if_present("STATUS")),
            observation_column: Some(ColumnSpec::required("OBS")),
            aliases,
        }
    }
}

impl SchemaConfig {
    /// 必需列（按 schema 顺序）
    pub fn required_columns(&self) -> Vec<String> {
        let mut columns = vec![
            self.code_column.clone(),
            self.description_column.clone(),
            self.stock_primary_column.clone(),
            self.stock_secondary_column.clone(),
            self.demand_column.clone(),
            self.safety_stock_column.clone(),
        ];
        if let Some(status) = self.status_column.as_ref().filter(|c| c.required) {
            columns.push(status.name.clone());
        }
        columns.push(self.supplier_column.clone());
        columns.push(self.on_order_column.clone());
        if let Some(obs) = self.observation_column.as_ref().filter(|c| c.required) {
            columns.push(obs.name.clone());
        }
        columns
    }

    /// 数量列（数值与非负校验对象）
    pub fn numeric_columns(&self) -> Vec<String> {
        vec![
            self.stock_primary_column.clone(),
            self.stock_secondary_column.clone(),
            self.demand_column.clone(),
            self.safety_stock_column.clone(),
            self.on_order_column.clone(),
        ]
    }

    /// 别名解析（未登记的列名原样返回）
    pub fn resolve_alias<'a>(&'a self, normalized: &'a str) -> &'a str {
        self.aliases
            .get(normalized)
            .map(String::as_str)
            .unwrap_or(normalized)
    }

    pub fn status_column_name(&self) -> Option<&str> {
        self.status_column.as_ref().map(|c| c.name.as_str())
    }

    pub fn observation_column_name(&self) -> Option<&str> {
        self.observation_column.as_ref().map(|c| c.name.as_str())
    }
}

// ==========================================
// AnalyzerConfig - 分析器配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// 默认工作表名
    pub default_sheet_name: String,

    /// 默认输出文件
    pub default_output_file: String,

    /// 历史目录（相对于输出文件所在目录）
    pub history_dir: String,

    /// 历史文件名前缀
    pub history_file_prefix: String,

    /// 报表语言（en / pt-BR）
    pub report_locale: String,

    /// 结果表每页行数
    pub page_size: usize,

    /// 最近使用的目录
    pub last_directory: Option<String>,

    pub schema: SchemaConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_sheet_name: "Cálculo MRP".to_string(),
            default_output_file: "itens_criticos.xlsx".to_string(),
            history_dir: "historico_mrp".to_string(),
            history_file_prefix: "itens_criticos".to_string(),
            report_locale: "en".to_string(),
            page_size: 50,
            last_directory: None,
            schema: SchemaConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// 默认配置文件路径（~/.mrp_analyzer/config.json）
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirUnavailable)
    }

    /// 从 JSON 文件加载并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: AnalyzerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置；文件不存在或损坏时回退默认值
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "配置加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存为 JSON（自动创建目录）
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "配置已保存");
        Ok(())
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        if self.history_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "history_dir".to_string(),
                message: "不能为空".to_string(),
            });
        }
        if self.history_file_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "history_file_prefix".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}
