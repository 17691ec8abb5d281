// ==========================================
// ABC 货位系统 - 导入 Trait
// ==========================================
// 职责: 定义文件解析接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawTable;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为原始表（列名已小写并去空白, 全空行已跳过）
    ///
    /// # 返回
    /// - Ok(RawTable)
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}
