// ==========================================
// ABC 货位系统 - 数据清洗器实现
// ==========================================
// 职责: 必需列校验 / 数值强制转换 / 丢弃无效行
// 输出: 可直接交给分类引擎的 ItemRecord
// ==========================================

use crate::config::ColumnConfig;
use crate::domain::item::ItemRecord;
use crate::domain::types::FieldValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{normalize_header, RawTable};
use tracing::warn;

// ==========================================
// CleanedItems - 清洗结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedItems {
    pub records: Vec<ItemRecord>,
    pub total_rows: usize,
    pub dropped_rows: usize, // 需求量/单价无法解析或为负的行
}

pub struct DataCleaner;

impl DataCleaner {
    /// 解析数值（去空白; 空值、非有限数返回 None）
    pub fn parse_number(&self, value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// 清洗原始表
    ///
    /// 规则:
    /// 1) 必需列（不区分大小写）缺失 → MissingColumns
    /// 2) 需求量/单价转为数值, 失败或为负的行丢弃并计数
    /// 3) 全部行被丢弃 → NoValidRows
    /// 4) 物料编码列保留原文, 其余列可解析为数值的转为数值
    pub fn prepare(&self, table: &RawTable, columns: &ColumnConfig) -> ImportResult<CleanedItems> {
        let item_col = normalize_header(&columns.item);
        let demand_col = normalize_header(&columns.demand);
        let cost_col = normalize_header(&columns.cost);

        let missing: Vec<String> = [&item_col, &demand_col, &cost_col]
            .into_iter()
            .filter(|name| table.column_index(name).is_none())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        // 上面已确认三列存在
        let column = |name: &str| table.column_index(name).unwrap_or_default();
        let (item_idx, demand_idx, cost_idx) =
            (column(&item_col), column(&demand_col), column(&cost_col));

        let mut records = Vec::with_capacity(table.len());
        for row in &table.rows {
            let demand = self.parse_number(&row[demand_idx]).filter(|v| *v >= 0.0);
            let cost = self.parse_number(&row[cost_idx]).filter(|v| *v >= 0.0);
            let (Some(demand), Some(cost)) = (demand, cost) else {
                continue;
            };

            let fields = table
                .headers
                .iter()
                .zip(row.iter())
                .enumerate()
                .map(|(idx, (header, raw))| {
                    let value = if idx == demand_idx {
                        FieldValue::Number(demand)
                    } else if idx == cost_idx {
                        FieldValue::Number(cost)
                    } else if idx == item_idx {
                        FieldValue::Text(raw.clone())
                    } else {
                        self.parse_number(raw)
                            .map(FieldValue::Number)
                            .unwrap_or_else(|| FieldValue::Text(raw.clone()))
                    };
                    (header.clone(), value)
                })
                .collect();

            records.push(ItemRecord {
                item_id: row[item_idx].clone(),
                fields,
            });
        }

        let total_rows = table.len();
        let dropped_rows = total_rows - records.len();
        if records.is_empty() {
            return Err(ImportError::NoValidRows { total: total_rows });
        }
        if dropped_rows > 0 {
            warn!(
                dropped_rows,
                total_rows, "部分行的需求量或单价不是有效的非负数值, 已丢弃"
            );
        }

        Ok(CleanedItems {
            records,
            total_rows,
            dropped_rows,
        })
    }
}
