// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use abc_slotting::config::SlottingConfig;
use abc_slotting::domain::{ClassAlleyMap, FieldValue, ItemRecord, WarehouseGeometry};
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// ItemRecord 构建器
// ==========================================

pub struct ItemBuilder {
    item_id: String,
    annual_demand: f64,
    unit_cost: f64,
    extra_fields: Vec<(String, FieldValue)>,
}

impl ItemBuilder {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            annual_demand: 1.0,
            unit_cost: 1.0,
            extra_fields: Vec::new(),
        }
    }

    pub fn demand(mut self, demand: f64) -> Self {
        self.annual_demand = demand;
        self
    }

    pub fn unit_cost(mut self, cost: f64) -> Self {
        self.unit_cost = cost;
        self
    }

    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.extra_fields.push((name.to_string(), value.into()));
        self
    }

    pub fn build(self) -> ItemRecord {
        let mut record = ItemRecord::new(self.item_id.clone())
            .with_field("item_id", self.item_id)
            .with_field("annual_demand", self.annual_demand)
            .with_field("unit_cost", self.unit_cost);
        for (name, value) in self.extra_fields {
            record = record.with_field(name, value);
        }
        record
    }
}

/// 按 (item_id, 需求量, 单价) 批量构建
pub fn create_test_items(rows: &[(&str, f64, f64)]) -> Vec<ItemRecord> {
    rows
        .iter()
        .map(|(id, demand, cost)| ItemBuilder::new(id).demand(*demand).unit_cost(*cost).build())
        .collect()
}

/// 构建 n 行价值互不相同的物料（价值随序号递减）
pub fn create_descending_items(count: usize) -> Vec<ItemRecord> {
    (0..count)
        .map(|i| {
            ItemBuilder::new(&format!("SKU{:04}", i))
                .demand((count - i) as f64)
                .unit_cost(1.0)
                .build()
        })
        .collect()
}

// ==========================================
// 仓库配置
// ==========================================

/// 小型仓库: 每巷道 2 货架 × 1 层 × 2 位
pub fn create_test_geometry() -> WarehouseGeometry {
    WarehouseGeometry {
        deposits: 1,
        alleys: 4,
        blocks: 2,
        levels: 1,
        positions: 2,
    }
}

pub fn create_test_alleys() -> ClassAlleyMap {
    ClassAlleyMap::new(vec![2, 1], vec![3], vec![4])
}

pub fn create_test_config() -> SlottingConfig {
    SlottingConfig {
        geometry: create_test_geometry(),
        class_alleys: create_test_alleys(),
        ..SlottingConfig::default()
    }
}

// ==========================================
// 文件辅助
// ==========================================

pub fn write_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("写入测试文件失败");
    path
}
