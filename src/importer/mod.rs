// ==========================================
// ABC 货位系统 - 导入层
// ==========================================
// 职责: 外部文件 → 原始表 → 清洗后的物料行
// 支持: CSV（自动识别分隔符）, Excel
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::{CleanedItems, DataCleaner};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawTable, UniversalFileParser, CANDIDATE_DELIMITERS};

// 重导出 Trait 接口
pub use importer_trait::FileParser;
