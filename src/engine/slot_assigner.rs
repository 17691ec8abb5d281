// ==========================================
// ABC 货位系统 - 货位分配引擎
// ==========================================
// 职责: 按分类与类内排名推导货位, 线性探测解决冲突
// 输入: ClassifiedTable + 分类巷道池 + 仓库几何结构
// 输出: LocatedItem 列表（按 分类升序 + 价值降序 输出）
// 红线: 处理顺序即契约, 决定冲突时谁胜出
// ==========================================

use crate::domain::item::{ClassifiedItem, ClassifiedTable, LocatedItem};
use crate::domain::types::AbcClass;
use crate::domain::warehouse::{ClassAlleyMap, Location, SlotCoordinate, WarehouseGeometry};
use crate::engine::classifier::compare_amount_desc;
use crate::engine::error::{EngineError, EngineResult};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// 默认冲突探测上限
pub const DEFAULT_PROBE_LIMIT: u32 = 1000;

// ==========================================
// ClaimedLocations - 单次分配内已占用货位
// ==========================================
// 每次 assign_locations 独立创建, 跨分类共享, 不跨调用共享
#[derive(Debug, Clone, Default)]
pub struct ClaimedLocations {
    claimed: HashSet<SlotCoordinate>,
}

impl ClaimedLocations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: &SlotCoordinate) -> bool {
        self.claimed.contains(coord)
    }

    /// 占用货位, 已被占用时返回 false
    pub fn claim(&mut self, coord: SlotCoordinate) -> bool {
        self.claimed.insert(coord)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

// ==========================================
// SlotAssigner - 货位分配引擎
// ==========================================
pub struct SlotAssigner {
    probe_limit: u32,
}

impl SlotAssigner {
    pub fn new() -> Self {
        Self {
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }

    /// 指定冲突探测上限
    pub fn with_probe_limit(probe_limit: u32) -> Self {
        Self { probe_limit }
    }

    pub fn probe_limit(&self) -> u32 {
        self.probe_limit
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为分类结果分配货位（使用全新的占用集合）
    ///
    /// # 返回
    /// - `Ok(Vec<LocatedItem>)`: 按 (分类, 价值降序, 输入顺序) 排列
    /// - `Err(EngineError::InvalidInput)`: 几何维度为 0 或巷道号越界
    #[instrument(skip(self, table, class_alleys), fields(
        rows_count = table.len(),
        probe_limit = self.probe_limit
    ))]
    pub fn assign_locations(
        &self,
        table: &ClassifiedTable,
        class_alleys: &ClassAlleyMap,
        geometry: &WarehouseGeometry,
    ) -> EngineResult<Vec<LocatedItem>> {
        let mut claimed = ClaimedLocations::new();
        self.assign_with_claimed(&table.items, class_alleys, geometry, &mut claimed)
    }

    /// 为分类行分配货位, 占用集合由调用方传入并在分配过程中更新
    pub fn assign_with_claimed(
        &self,
        items: &[ClassifiedItem],
        class_alleys: &ClassAlleyMap,
        geometry: &WarehouseGeometry,
        claimed: &mut ClaimedLocations,
    ) -> EngineResult<Vec<LocatedItem>> {
        geometry.validate().map_err(EngineError::InvalidInput)?;
        class_alleys
            .validate(geometry.alleys)
            .map_err(EngineError::InvalidInput)?;

        // 1. 二次排序: 分类升序, 价值降序, 并列按输入顺序
        let mut ordered: Vec<&ClassifiedItem> = items.iter().collect();
        ordered.sort_by(|a, b| compare_class_then_value(a, b));

        // 2. 逐行推导（类内排名从 0 开始, 各类独立计数）
        let mut class_ranks = [0usize; 3];
        let mut located = Vec::with_capacity(ordered.len());
        for item in ordered {
            let slot = class_slot(item.abc_class);
            let rank = class_ranks[slot];
            class_ranks[slot] += 1;

            let location = self.derive_location(
                item.abc_class,
                rank,
                class_alleys.alleys_for(item.abc_class),
                geometry,
                claimed,
            );

            match location {
                Location::Assigned(_) => {}
                Location::NoLocationAvailable => {
                    debug!(item_id = %item.item_id(), class = %item.abc_class, "分类未配置巷道");
                }
                Location::CollisionExhausted => {
                    warn!(
                        item_id = %item.item_id(),
                        class = %item.abc_class,
                        rank,
                        "冲突探测耗尽, 无可用货位"
                    );
                }
            }

            located.push(LocatedItem {
                item: item.clone(),
                location,
            });
        }

        debug!(
            a_count = class_ranks[0],
            b_count = class_ranks[1],
            c_count = class_ranks[2],
            claimed = claimed.len(),
            "货位分配完成"
        );

        Ok(located)
    }

    /// 推导单行货位（校验几何结构与巷道号后调用推导规则）
    ///
    /// # 返回
    /// - `Ok(Location)`: 已分配货位或哨兵值
    /// - `Err(EngineError::InvalidInput)`: 几何维度越界或巷道号越界
    pub fn locate(
        &self,
        class: AbcClass,
        rank: usize,
        configured_alleys: &[u32],
        geometry: &WarehouseGeometry,
        claimed: &mut ClaimedLocations,
    ) -> EngineResult<Location> {
        geometry.validate().map_err(EngineError::InvalidInput)?;
        if let Some(bad) = configured_alleys
            .iter()
            .find(|&&alley| alley < 1 || alley > geometry.alleys)
        {
            return Err(EngineError::InvalidInput(format!(
                "{} 类巷道 {} 超出范围 [1, {}]",
                class, bad, geometry.alleys
            )));
        }
        Ok(self.derive_location(class, rank, configured_alleys, geometry, claimed))
    }

    /// 推导规则（调用方已校验几何结构与巷道号）
    ///
    /// 规则:
    /// 1) 无巷道 → NoLocationAvailable（不占用）
    /// 2) A 类巷道升序后取用, B/C 按配置顺序
    /// 3) 巷道 = alleys[rank mod n], 巷道内排名 = rank div n
    /// 4) 巷道内排名超出单库区容量时进入后续库区
    /// 5) 冲突时逐位探测: 位 → 层 → 货架 → 巷道, 巷道索引回到 0
    ///    且货架/层/位均为 1 时库区 +1
    ///
    /// 注意: 库区递增只在巷道索引回绕到 0 时触发, 从非 0 索引开始探测时
    /// 会跳过当前库区中索引更小的巷道
    fn derive_location(
        &self,
        class: AbcClass,
        rank: usize,
        configured_alleys: &[u32],
        geometry: &WarehouseGeometry,
        claimed: &mut ClaimedLocations,
    ) -> Location {
        if configured_alleys.is_empty() {
            return Location::NoLocationAvailable;
        }

        let mut alleys = configured_alleys.to_vec();
        if class == AbcClass::A {
            alleys.sort_unstable();
        }
        let alley_count = alleys.len();

        let mut alley_index = rank % alley_count;
        let mut position_rank = rank / alley_count;

        let positions_per_alley = geometry.positions_per_alley();
        let mut deposit = 1usize;
        if position_rank >= positions_per_alley {
            deposit = 1 + position_rank / positions_per_alley;
            position_rank %= positions_per_alley;
        }

        let per_block = (geometry.levels as usize).saturating_mul(geometry.positions as usize);
        let positions = geometry.positions as usize;
        let remaining = position_rank % per_block;

        let mut coord = SlotCoordinate {
            deposit: saturate(deposit),
            alley: alleys[alley_index],
            block: saturate(1 + position_rank / per_block),
            level: saturate(1 + remaining / positions),
            position: saturate(1 + remaining % positions),
        };

        // 冲突探测
        let mut attempts = 0;
        while claimed.contains(&coord) && attempts < self.probe_limit {
            coord.position += 1;
            if coord.position > geometry.positions {
                coord.position = 1;
                coord.level += 1;
            }
            if coord.level > geometry.levels {
                coord.level = 1;
                coord.block += 1;
            }
            if coord.block > geometry.blocks {
                coord.block = 1;
                alley_index = (alley_index + 1) % alley_count;
                coord.alley = alleys[alley_index];
            }
            if alley_index == 0 && coord.block == 1 && coord.level == 1 && coord.position == 1 {
                coord.deposit = coord.deposit.saturating_add(1);
            }
            attempts += 1;
        }

        if claimed.contains(&coord) {
            return Location::CollisionExhausted;
        }

        claimed.claim(coord);
        Location::Assigned(coord)
    }
}

impl Default for SlotAssigner {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 辅助方法
// ==========================================

/// 分类升序, 价值降序, 并列按 input_index 升序
fn compare_class_then_value(a: &ClassifiedItem, b: &ClassifiedItem) -> Ordering {
    a.abc_class
        .cmp(&b.abc_class)
        .then_with(|| compare_amount_desc(a.annual_value, b.annual_value))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

fn class_slot(class: AbcClass) -> usize {
    match class {
        AbcClass::A => 0,
        AbcClass::B => 1,
        AbcClass::C => 2,
    }
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
