// ==========================================
// ABC 货位系统 - 导出层
// ==========================================
// 职责: 已分配货位的结果表 → 分隔文本
// ==========================================

// 模块声明
pub mod csv_writer;
pub mod error;

// 重导出核心类型
pub use csv_writer::{export_to_path, write_located_csv, DEFAULT_EXPORT_DELIMITER, DERIVED_COLUMNS};
pub use error::{ExportError, ExportResult};
