// ==========================================
// ABC 货位系统 - 引擎编排器
// ==========================================
// 用途: 协调 分类 → 汇总 → 货位分配 的执行顺序
// 红线: 单向数据流, 每次运行独立重算, 不跨运行保存状态
// ==========================================

use crate::config::SlottingConfig;
use crate::domain::item::{ClassSummary, ClassifiedTable, ItemRecord, LocatedItem, ParetoSeries};
use crate::domain::warehouse::{Location, WarehouseGeometry};
use crate::engine::analysis::AbcAnalysis;
use crate::engine::error::EngineResult;
use crate::engine::slot_assigner::SlotAssigner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

// ==========================================
// PlacementStats - 货位分配统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub assigned: usize,
    pub no_location: usize,
    pub collision_exhausted: usize,
    pub deposit_overflow: usize, // 超出配置库区数的已分配行
}

impl PlacementStats {
    pub fn from_located(located: &[LocatedItem], geometry: &WarehouseGeometry) -> Self {
        let mut stats = Self::default();
        for row in located {
            match row.location {
                Location::Assigned(coord) => {
                    stats.assigned += 1;
                    if coord.deposit > geometry.deposits {
                        stats.deposit_overflow += 1;
                    }
                }
                Location::NoLocationAvailable => stats.no_location += 1,
                Location::CollisionExhausted => stats.collision_exhausted += 1,
            }
        }
        stats
    }

    pub fn failed(&self) -> usize {
        self.no_location + self.collision_exhausted
    }
}

// ==========================================
// AnalysisReport - 单次分析结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub geometry: WarehouseGeometry,
    pub classified: ClassifiedTable,
    pub summary: Vec<ClassSummary>,
    pub pareto: ParetoSeries,
    pub located: Vec<LocatedItem>,
    pub stats: PlacementStats,
}

// ==========================================
// SlottingOrchestrator - 引擎编排器
// ==========================================
pub struct SlottingOrchestrator {
    config: SlottingConfig,
    assigner: SlotAssigner,
}

impl SlottingOrchestrator {
    /// 创建编排器（配置应已通过 validate）
    pub fn new(config: SlottingConfig) -> Self {
        Self {
            assigner: SlotAssigner::with_probe_limit(config.probe_limit),
            config,
        }
    }

    pub fn config(&self) -> &SlottingConfig {
        &self.config
    }

    /// 执行完整分析流程
    ///
    /// # 返回
    /// - `Ok(AnalysisReport)`: 单行货位失败以哨兵值内联记录
    /// - `Err(EngineError)`: 输入或配置的结构性错误
    pub fn run(&self, records: &[ItemRecord]) -> EngineResult<AnalysisReport> {
        let run_id = Uuid::new_v4();
        let columns = &self.config.columns;
        let cutoffs = self.config.classification;

        info!(
            %run_id,
            records_count = records.len(),
            a_cutoff = cutoffs.a_cutoff,
            b_cutoff = cutoffs.b_cutoff,
            "开始执行 ABC 货位分析"
        );

        // ==========================================
        // 步骤1: ABC 分类
        // ==========================================
        debug!("步骤1: 执行 ABC 分类");
        let mut analysis = AbcAnalysis::new();
        analysis.perform(
            records,
            &columns.demand,
            &columns.cost,
            cutoffs.a_cutoff,
            cutoffs.b_cutoff,
        )?;

        // ==========================================
        // 步骤2: 分类汇总与帕累托序列
        // ==========================================
        debug!("步骤2: 生成分类汇总");
        let summary = analysis.class_summary()?;
        let pareto = analysis.pareto_series()?;
        let classified = analysis.into_result()?;

        // ==========================================
        // 步骤3: 货位分配
        // ==========================================
        debug!("步骤3: 执行货位分配");
        let geometry = self.config.geometry;
        let located =
            self.assigner
                .assign_locations(&classified, &self.config.class_alleys, &geometry)?;
        let stats = PlacementStats::from_located(&located, &geometry);

        if stats.deposit_overflow > 0 {
            warn!(
                deposit_overflow = stats.deposit_overflow,
                configured_deposits = geometry.deposits,
                "部分物料超出配置库区数"
            );
        }
        if stats.failed() > 0 {
            warn!(
                no_location = stats.no_location,
                collision_exhausted = stats.collision_exhausted,
                "部分物料未分配到货位"
            );
        }

        info!(
            %run_id,
            assigned = stats.assigned,
            failed = stats.failed(),
            "ABC 货位分析完成"
        );

        Ok(AnalysisReport {
            run_id,
            generated_at: Utc::now(),
            geometry,
            classified,
            summary,
            pareto,
            located,
            stats,
        })
    }
}
