// ==========================================
// ABC 货位系统 - 引擎层
// ==========================================
// 职责: 分类、汇总、货位分配等纯计算规则, 不做 I/O
// 数据流: 物料行 → 分类 → 汇总 → 货位分配
// ==========================================

pub mod analysis;
pub mod classifier;
pub mod error;
pub mod orchestrator;
pub mod slot_assigner;
pub mod summary;

// 重导出核心引擎
pub use analysis::AbcAnalysis;
pub use classifier::{class_rules, resolve_class, AbcClassifier, ClassRule};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{AnalysisReport, PlacementStats, SlottingOrchestrator};
pub use slot_assigner::{ClaimedLocations, SlotAssigner, DEFAULT_PROBE_LIMIT};
pub use summary::SummaryEngine;
