// ==========================================
// ABC 货位系统 - 配置层
// ==========================================
// 职责: 分析配置的加载、默认值与校验
// 存储: JSON 文件
// ==========================================

pub mod slotting_config;

// 重导出核心配置
pub use slotting_config::{
    default_config_path, ClassificationConfig, ColumnConfig, ConfigError, ConfigResult,
    SlottingConfig, CONFIG_PATH_ENV,
};
