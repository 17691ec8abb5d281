// ==========================================
// ABC 货位系统 - 分析会话
// ==========================================
// 职责: 持有最近一次分类结果, 回答派生查询（汇总 / 帕累托）
// 红线: 未执行分类前的派生查询 → NoAnalysisYet
// ==========================================

use crate::domain::item::{ClassSummary, ClassifiedTable, ItemRecord, ParetoSeries};
use crate::engine::classifier::AbcClassifier;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::summary::SummaryEngine;

/// 单个数据集的分析会话
///
/// 会话之间不共享任何可变状态, 并发分析时每个数据集各持一个实例
#[derive(Debug, Default)]
pub struct AbcAnalysis {
    result: Option<ClassifiedTable>,
}

impl AbcAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    /// 执行分类并保存结果
    ///
    /// 分类失败时保留上一次结果不变
    pub fn perform(
        &mut self,
        rows: &[ItemRecord],
        demand_field: &str,
        cost_field: &str,
        a_cutoff: f64,
        b_cutoff: f64,
    ) -> EngineResult<&ClassifiedTable> {
        let table = AbcClassifier::new().classify(rows, demand_field, cost_field, a_cutoff, b_cutoff)?;
        Ok(&*self.result.insert(table))
    }

    /// 最近一次分类结果
    pub fn result(&self) -> EngineResult<&ClassifiedTable> {
        self.result.as_ref().ok_or(EngineError::NoAnalysisYet)
    }

    pub fn class_summary(&self) -> EngineResult<Vec<ClassSummary>> {
        Ok(SummaryEngine::new().class_summary(self.result()?))
    }

    pub fn pareto_series(&self) -> EngineResult<ParetoSeries> {
        Ok(SummaryEngine::new().pareto_series(self.result()?))
    }

    /// 取出结果并消费会话
    pub fn into_result(self) -> EngineResult<ClassifiedTable> {
        self.result.ok_or(EngineError::NoAnalysisYet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<ItemRecord> {
        vec![
            ItemRecord::new("X")
                .with_field("annual_demand", 100.0)
                .with_field("unit_cost", 10.0),
            ItemRecord::new("Y")
                .with_field("annual_demand", 50.0)
                .with_field("unit_cost", 5.0),
        ]
    }

    #[test]
    fn test_queries_before_perform_fail() {
        let analysis = AbcAnalysis::new();
        assert_eq!(analysis.result().unwrap_err(), EngineError::NoAnalysisYet);
        assert_eq!(analysis.class_summary().unwrap_err(), EngineError::NoAnalysisYet);
        assert_eq!(analysis.pareto_series().unwrap_err(), EngineError::NoAnalysisYet);
    }

    #[test]
    fn test_perform_then_query() {
        let mut analysis = AbcAnalysis::new();
        analysis
            .perform(&rows(), "annual_demand", "unit_cost", 0.8, 0.95)
            .unwrap();

        assert_eq!(analysis.result().unwrap().len(), 2);
        assert!(!analysis.class_summary().unwrap().is_empty());
        assert_eq!(analysis.pareto_series().unwrap().item_percentage, vec![0.5, 1.0]);
    }

    #[test]
    fn test_failed_perform_keeps_previous_result() {
        let mut analysis = AbcAnalysis::new();
        analysis
            .perform(&rows(), "annual_demand", "unit_cost", 0.8, 0.95)
            .unwrap();

        assert!(analysis
            .perform(&[], "annual_demand", "unit_cost", 0.8, 0.95)
            .is_err());
        assert_eq!(analysis.result().unwrap().len(), 2);
    }

    #[test]
    fn test_into_result_hands_over_table() {
        assert_eq!(
            AbcAnalysis::new().into_result().unwrap_err(),
            EngineError::NoAnalysisYet
        );

        let mut analysis = AbcAnalysis::new();
        let performed = analysis
            .perform(&rows(), "annual_demand", "unit_cost", 0.8, 0.95)
            .unwrap()
            .clone();
        assert_eq!(analysis.into_result().unwrap(), performed);
    }
}
