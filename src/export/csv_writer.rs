// ==========================================
// ABC 货位系统 - 结果导出
// ==========================================
// 格式: 分隔文本表（默认 ';'）
// 列顺序: 原始列, annual_value, value_percentage,
//         cumulative_value_percentage, item_percentage,
//         abc_class, warehouse_location
// ==========================================

use crate::domain::item::LocatedItem;
use crate::export::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 默认导出分隔符
pub const DEFAULT_EXPORT_DELIMITER: u8 = b';';

/// 派生列（追加在原始列之后）
pub const DERIVED_COLUMNS: [&str; 6] = [
    "annual_value",
    "value_percentage",
    "cumulative_value_percentage",
    "item_percentage",
    "abc_class",
    "warehouse_location",
];

/// 写出已分配货位的结果表
///
/// 原始列取首行的列顺序; 某行缺少该列时输出空值
pub fn write_located_csv<W: Write>(
    writer: W,
    located: &[LocatedItem],
    delimiter: u8,
) -> ExportResult<()> {
    let mut csv_writer = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    let source_columns: Vec<String> = located
        .first()
        .map(|row| row.item.record.column_names().map(str::to_string).collect())
        .unwrap_or_default();

    let header = source_columns
        .iter()
        .map(String::as_str)
        .chain(DERIVED_COLUMNS);
    csv_writer.write_record(header)?;

    for row in located {
        let item = &row.item;
        let mut record: Vec<String> = source_columns
            .iter()
            .map(|column| {
                item.record
                    .field(column)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        record.extend([
            item.annual_value.to_string(),
            item.value_percentage.to_string(),
            item.cumulative_value_percentage.to_string(),
            item.item_percentage.to_string(),
            item.abc_class.to_string(),
            row.location.to_string(),
        ]);
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 导出到文件
pub fn export_to_path<P: AsRef<Path>>(
    path: P,
    located: &[LocatedItem],
    delimiter: u8,
) -> ExportResult<()> {
    let file = File::create(path.as_ref()).map_err(|e| ExportError::CreateFile {
        path: path.as_ref().display().to_string(),
        message: e.to_string(),
    })?;
    write_located_csv(file, located, delimiter)
}
