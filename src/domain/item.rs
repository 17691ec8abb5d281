// ==========================================
// ABC 货位系统 - 物料领域模型
// ==========================================
// 用途: 导入层写入 ItemRecord, 引擎层派生 ClassifiedItem / LocatedItem
// ==========================================

use crate::domain::types::{AbcClass, FieldValue};
use crate::domain::warehouse::Location;
use serde::{Deserialize, Serialize};

// ==========================================
// ItemRecord - 物料原始行
// ==========================================
// 红线: 物料号不去重,重复行视为独立行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub item_id: String,                    // 物料标识（不透明）
    pub fields: Vec<(String, FieldValue)>,  // 原始列（保持源文件列顺序）
}

impl ItemRecord {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            fields: Vec::new(),
        }
    }

    /// 追加一列（构建器风格）
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// 按列名查找
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// 按列名读取数值（缺失或文本返回 None）
    pub fn numeric_field(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_number)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(column, _)| column.as_str())
    }
}

// ==========================================
// ClassifiedItem - 已分类物料
// ==========================================
// 派生字段由 Classifier 计算,调用方不可提供
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub input_index: usize, // 调用方输入中的位置（两次排序的并列裁决键）
    pub record: ItemRecord,
    pub demand: f64,
    pub unit_cost: f64,

    // ===== 派生字段 =====
    pub annual_value: f64,                // demand × unit_cost
    pub value_percentage: f64,            // 占总价值比例 (0~1)
    pub cumulative_value_percentage: f64, // 累计价值比例 (0~1)
    pub item_percentage: f64,             // 排名 / 物料总数 (0~1)
    pub abc_class: AbcClass,
}

impl ClassifiedItem {
    pub fn item_id(&self) -> &str {
        &self.record.item_id
    }
}

// ==========================================
// ClassifiedTable - 分类结果表
// ==========================================
// 不变量: 按 annual_value 降序（并列按输入顺序）,
// 总价值为正时 cumulative_value_percentage 单调不减且末行为 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTable {
    pub items: Vec<ClassifiedItem>,
    pub total_value: f64,
    pub a_cutoff: f64,
    pub b_cutoff: f64,
}

impl ClassifiedTable {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 某分类的物料数
    pub fn count_of(&self, class: AbcClass) -> usize {
        self.items.iter().filter(|i| i.abc_class == class).count()
    }

    /// 原始列名（取首行的列顺序）
    pub fn column_names(&self) -> Vec<String> {
        self.items
            .first()
            .map(|item| item.record.column_names().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

// ==========================================
// LocatedItem - 已分配货位的物料
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedItem {
    pub item: ClassifiedItem,
    pub location: Location,
}

// ==========================================
// ClassSummary - 分类汇总行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub abc_class: AbcClass,
    pub item_count: usize,
    pub item_percentage: f64,  // 占物料总数 (0~100)
    pub total_value: f64,
    pub value_percentage: f64, // 占总价值 (0~100)
}

// ==========================================
// ParetoSeries - 帕累托图数据
// ==========================================
// 三个序列按分类表顺序对齐,渲染由外部负责
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoSeries {
    pub item_percentage: Vec<f64>,
    pub value_percentage: Vec<f64>,
    pub cumulative_percentage: Vec<f64>,
    pub a_boundary: Option<f64>, // A 类最大 item_percentage
    pub b_boundary: Option<f64>, // B 类最大 item_percentage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_record_field_lookup() {
        let record = ItemRecord::new("SKU-1")
            .with_field("item_id", "SKU-1")
            .with_field("annual_demand", 120.0)
            .with_field("description", "bolt");

        assert_eq!(record.numeric_field("annual_demand"), Some(120.0));
        assert_eq!(record.numeric_field("description"), None);
        assert_eq!(record.numeric_field("unit_cost"), None);
        assert_eq!(
            record.column_names().collect::<Vec<_>>(),
            vec!["item_id", "annual_demand", "description"]
        );
    }
}
