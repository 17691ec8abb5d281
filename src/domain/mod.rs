// ==========================================
// ABC 货位系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含 I/O 逻辑,不含引擎逻辑
// ==========================================

pub mod item;
pub mod types;
pub mod warehouse;

// 重导出核心类型
pub use item::{ClassSummary, ClassifiedItem, ClassifiedTable, ItemRecord, LocatedItem, ParetoSeries};
pub use types::{AbcClass, FieldValue};
pub use warehouse::{
    ClassAlleyMap, Location, SlotCoordinate, WarehouseGeometry, COLLISION_EXHAUSTED,
    MAX_DIMENSION, NO_LOCATION_AVAILABLE,
};
