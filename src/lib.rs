// ==========================================
// ABC 货位系统 - 核心库
// ==========================================
// 职责: 库存 ABC 分类 + 按分类确定性分配仓库货位
// 系统定位: 决策支持工具 (纯计算核心 + 轻量 I/O 适配)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分类 / 汇总 / 货位分配
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 分隔文本表
pub mod export;

// 配置层 - 分析配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AbcClass, ClassAlleyMap, ClassSummary, ClassifiedItem, ClassifiedTable, FieldValue,
    ItemRecord, LocatedItem, Location, ParetoSeries, SlotCoordinate, WarehouseGeometry,
};

// 引擎
pub use engine::{
    AbcAnalysis, AbcClassifier, AnalysisReport, ClaimedLocations, EngineError, EngineResult,
    PlacementStats, SlotAssigner, SlottingOrchestrator, SummaryEngine,
};

// 配置
pub use config::SlottingConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ABC 货位系统";
