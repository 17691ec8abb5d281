// ==========================================
// ABC 货位系统 - 分类汇总引擎
// ==========================================
// 职责: 分类汇总表 + 帕累托图数据序列
// 输入: ClassifiedTable
// 输出: Vec<ClassSummary> / ParetoSeries
// ==========================================

use crate::domain::item::{ClassSummary, ClassifiedTable, ParetoSeries};
use crate::domain::types::AbcClass;

// ==========================================
// SummaryEngine - 分类汇总引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 分类汇总（按 A, B, C 顺序, 仅包含非空分类）
    ///
    /// 百分比为 0~100 口径; 总价值为 0 时 value_percentage 记为 0
    pub fn class_summary(&self, table: &ClassifiedTable) -> Vec<ClassSummary> {
        let total_items = table.len() as f64;
        let total_value: f64 = table.items.iter().map(|i| i.annual_value).sum();

        AbcClass::ALL
            .iter()
            .filter_map(|&class| {
                let members = table.items.iter().filter(|i| i.abc_class == class);
                let (item_count, class_value) = members
                    .fold((0usize, 0.0f64), |(n, v), item| (n + 1, v + item.annual_value));
                if item_count == 0 {
                    return None;
                }

                Some(ClassSummary {
                    abc_class: class,
                    item_count,
                    item_percentage: item_count as f64 / total_items * 100.0,
                    total_value: class_value,
                    value_percentage: if total_value > 0.0 {
                        class_value / total_value * 100.0
                    } else {
                        0.0
                    },
                })
            })
            .collect()
    }

    /// 帕累托图数据（与分类表顺序对齐）
    pub fn pareto_series(&self, table: &ClassifiedTable) -> ParetoSeries {
        let boundary = |class: AbcClass| {
            table
                .items
                .iter()
                .filter(|i| i.abc_class == class)
                .map(|i| i.item_percentage)
                .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |m| m.max(p))))
        };

        ParetoSeries {
            item_percentage: table.items.iter().map(|i| i.item_percentage).collect(),
            value_percentage: table.items.iter().map(|i| i.value_percentage).collect(),
            cumulative_percentage: table
                .items
                .iter()
                .map(|i| i.cumulative_value_percentage)
                .collect(),
            a_boundary: boundary(AbcClass::A),
            b_boundary: boundary(AbcClass::B),
        }
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}
