// ==========================================
// ABC 货位系统 - 分析配置
// ==========================================
// 职责: 列名、分类阈值、仓库几何、巷道池、探测上限
// 存储: JSON 文件（缺失键取默认值）
// ==========================================

use crate::domain::warehouse::{ClassAlleyMap, WarehouseGeometry};
use crate::engine::slot_assigner::DEFAULT_PROBE_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "ABC_SLOTTING_CONFIG";

// ==========================================
// 配置错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ColumnConfig - 输入列名
// ==========================================
// 列名匹配不区分大小写（导入时统一小写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub item: String,
    pub demand: String,
    pub cost: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            item: "item_id".to_string(),
            demand: "annual_demand".to_string(),
            cost: "unit_cost".to_string(),
        }
    }
}

// ==========================================
// ClassificationConfig - 分类阈值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub a_cutoff: f64, // A 类累计价值占比上限
    pub b_cutoff: f64, // A+B 类累计价值占比上限
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            a_cutoff: 0.8,
            b_cutoff: 0.95,
        }
    }
}

// ==========================================
// SlottingConfig - 完整配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlottingConfig {
    pub columns: ColumnConfig,
    pub classification: ClassificationConfig,
    pub geometry: WarehouseGeometry,
    pub class_alleys: ClassAlleyMap,
    pub probe_limit: u32,
}

impl Default for SlottingConfig {
    fn default() -> Self {
        Self {
            columns: ColumnConfig::default(),
            classification: ClassificationConfig::default(),
            geometry: WarehouseGeometry::default(),
            class_alleys: ClassAlleyMap::default(),
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }
}

impl SlottingConfig {
    /// 从 JSON 文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "加载配置文件");
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 加载配置: 显式路径 > 默认路径（存在时）> 内置默认值
    pub fn load_or_default(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// 校验配置
    ///
    /// 阈值顺序 (a_cutoff > b_cutoff) 只告警不拒绝, 分类器对此有确定结果
    pub fn validate(&self) -> ConfigResult<()> {
        let ClassificationConfig { a_cutoff, b_cutoff } = self.classification;
        for (key, value) in [
            ("classification.a_cutoff", a_cutoff),
            ("classification.b_cutoff", b_cutoff),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("必须在 (0, 1] 内, 实际 {}", value),
                });
            }
        }
        if a_cutoff > b_cutoff {
            warn!(a_cutoff, b_cutoff, "a_cutoff 大于 b_cutoff, B 类将为空");
        }

        self.geometry
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                key: "geometry".to_string(),
                message,
            })?;

        self.class_alleys
            .validate(self.geometry.alleys)
            .map_err(|message| ConfigError::InvalidValue {
                key: "class_alleys".to_string(),
                message,
            })?;

        if self.probe_limit < 1 {
            return Err(ConfigError::InvalidValue {
                key: "probe_limit".to_string(),
                message: "必须 >= 1".to_string(),
            });
        }

        for (key, value) in [
            ("columns.item", &self.columns.item),
            ("columns.demand", &self.columns.demand),
            ("columns.cost", &self.columns.cost),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "列名不能为空".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// 默认配置文件路径
///
/// 优先读取环境变量 ABC_SLOTTING_CONFIG, 否则为 <用户配置目录>/abc-slotting/config.json
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir().map(|dir| dir.join("abc-slotting").join("config.json"))
}
