// ==========================================
// ABC 货位系统 - ABC 分类引擎
// ==========================================
// 职责: 年价值计算 + 价值降序排序 + 累计占比 + 分类
// 输入: 已清洗的物料行 (demand / cost 为数值)
// 输出: ClassifiedTable（按 annual_value 降序）
// 红线: 不修改调用方输入; 不校验 a_cutoff <= b_cutoff（由调用方负责）
// ==========================================

use crate::domain::item::{ClassifiedItem, ClassifiedTable, ItemRecord};
use crate::domain::types::AbcClass;
use crate::engine::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use tracing::{debug, instrument};

// ==========================================
// 分类规则表
// ==========================================
// 按优先级从紧到松排列, 首个命中的规则生效;
// 全部未命中为 C。边界值归入更紧的分类（恰好等于 a_cutoff 为 A）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassRule {
    pub class: AbcClass,
    pub cutoff: f64,
}

/// 构建有序规则表: [A ≤ a_cutoff, B ≤ b_cutoff]
pub fn class_rules(a_cutoff: f64, b_cutoff: f64) -> [ClassRule; 2] {
    [
        ClassRule {
            class: AbcClass::A,
            cutoff: a_cutoff,
        },
        ClassRule {
            class: AbcClass::B,
            cutoff: b_cutoff,
        },
    ]
}

/// 按规则表判定累计占比所属分类
pub fn resolve_class(rules: &[ClassRule], cumulative_share: f64) -> AbcClass {
    rules
        .iter()
        .find(|rule| cumulative_share <= rule.cutoff)
        .map(|rule| rule.class)
        .unwrap_or(AbcClass::C)
}

// ==========================================
// AbcClassifier - ABC 分类引擎
// ==========================================
pub struct AbcClassifier {
    // 无状态引擎
}

impl AbcClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行 ABC 分类
    ///
    /// 规则:
    /// 1) annual_value = demand × cost
    /// 2) 按 annual_value 降序稳定排序（并列按输入顺序）
    /// 3) 总价值为 0 时, 占比与累计占比全部为 0, 全部归入 C
    /// 4) 否则按累计占比套用规则表
    ///
    /// # 参数
    /// - `rows`: 物料行（非空）
    /// - `demand_field` / `cost_field`: 需求量、单价列名
    /// - `a_cutoff` / `b_cutoff`: 累计价值占比阈值 (0~1]
    ///
    /// # 返回
    /// - `Ok(ClassifiedTable)`
    /// - `Err(EngineError::InvalidInput)`: 空行集、字段缺失或非数值
    #[instrument(skip(self, rows), fields(rows_count = rows.len()))]
    pub fn classify(
        &self,
        rows: &[ItemRecord],
        demand_field: &str,
        cost_field: &str,
        a_cutoff: f64,
        b_cutoff: f64,
    ) -> EngineResult<ClassifiedTable> {
        if rows.is_empty() {
            return Err(EngineError::InvalidInput("物料行集合为空".to_string()));
        }

        // 1. 读取数值并计算年价值
        let mut items = Vec::with_capacity(rows.len());
        for (input_index, record) in rows.iter().enumerate() {
            let demand = read_amount(record, input_index, demand_field)?;
            let unit_cost = read_amount(record, input_index, cost_field)?;
            let annual_value = demand * unit_cost;
            if !annual_value.is_finite() {
                return Err(EngineError::InvalidInput(format!(
                    "行 {} (item_id={}): 年价值溢出 ({} × {})",
                    input_index, record.item_id, demand, unit_cost
                )));
            }
            items.push(ClassifiedItem {
                input_index,
                record: record.clone(),
                demand,
                unit_cost,
                annual_value,
                value_percentage: 0.0,
                cumulative_value_percentage: 0.0,
                item_percentage: 0.0,
                abc_class: AbcClass::C,
            });
        }

        // 2. 价值降序（稳定, 并列按输入顺序）
        items.sort_by(compare_value_desc);

        // 3. 累计占比与分类
        let total_value: f64 = items.iter().map(|i| i.annual_value).sum();
        if !total_value.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "总价值溢出: {}",
                total_value
            )));
        }
        let total_items = items.len() as f64;
        let rules = class_rules(a_cutoff, b_cutoff);

        let mut cumulative = 0.0;
        for (rank, item) in items.iter_mut().enumerate() {
            item.item_percentage = (rank + 1) as f64 / total_items;

            if total_value > 0.0 {
                item.value_percentage = item.annual_value / total_value;
                cumulative += item.value_percentage;
                item.cumulative_value_percentage = cumulative;
                item.abc_class = resolve_class(&rules, cumulative);
            } else {
                item.value_percentage = 0.0;
                item.cumulative_value_percentage = 0.0;
                item.abc_class = AbcClass::C;
            }
        }

        debug!(
            total_value,
            a_count = items.iter().filter(|i| i.abc_class == AbcClass::A).count(),
            b_count = items.iter().filter(|i| i.abc_class == AbcClass::B).count(),
            c_count = items.iter().filter(|i| i.abc_class == AbcClass::C).count(),
            "ABC 分类完成"
        );

        Ok(ClassifiedTable {
            items,
            total_value,
            a_cutoff,
            b_cutoff,
        })
    }
}

impl Default for AbcClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 比较方法
// ==========================================

/// annual_value 降序, 并列按 input_index 升序
///
/// 按数值相等判定并列（-0 与 +0 视为相等）
pub(crate) fn compare_value_desc(a: &ClassifiedItem, b: &ClassifiedItem) -> Ordering {
    compare_amount_desc(a.annual_value, b.annual_value)
        .then_with(|| a.input_index.cmp(&b.input_index))
}

/// 数值降序; 不可比较时视为相等, 交给后续条件
pub(crate) fn compare_amount_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// 读取非负有限数值字段
fn read_amount(record: &ItemRecord, row: usize, field: &str) -> EngineResult<f64> {
    let value = record.numeric_field(field).ok_or_else(|| {
        EngineError::InvalidInput(format!(
            "行 {} (item_id={}): 字段 {} 缺失或非数值",
            row, record.item_id, field
        ))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "行 {} (item_id={}): 字段 {} 必须为非负有限数, 实际 {}",
            row, record.item_id, field, value
        )));
    }

    // 统一 -0 为 +0
    Ok(value + 0.0)
}
