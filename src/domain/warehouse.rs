// ==========================================
// ABC 货位系统 - 仓库领域模型
// ==========================================
// 货位格式: d.aa.bb.ll.pp (库区.巷道.货架.层.位)
// aa/bb/ll/pp 补零至 2 位, d 不补零
// ==========================================

use crate::domain::types::AbcClass;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 无可用巷道的哨兵文本
pub const NO_LOCATION_AVAILABLE: &str = "no location available";

/// 冲突探测耗尽的哨兵文本
pub const COLLISION_EXHAUSTED: &str = "collision: no available location found";

/// 单个几何维度的上限
pub const MAX_DIMENSION: u32 = 9_999;

// ==========================================
// WarehouseGeometry - 仓库几何结构
// ==========================================
// 库区数只是起始配置,溢出时货位分配会继续向上增长
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseGeometry {
    pub deposits: u32,  // 库区数
    pub alleys: u32,    // 每库区巷道数
    pub blocks: u32,    // 每巷道货架数
    pub levels: u32,    // 每货架层数
    pub positions: u32, // 每层货位数
}

impl WarehouseGeometry {
    /// 单巷道（单库区）货位容量
    pub fn positions_per_alley(&self) -> usize {
        (self.blocks as usize)
            .saturating_mul(self.levels as usize)
            .saturating_mul(self.positions as usize)
    }

    /// 校验所有维度在 [1, MAX_DIMENSION]
    pub fn validate(&self) -> Result<(), String> {
        let dims = [
            ("deposits", self.deposits),
            ("alleys", self.alleys),
            ("blocks", self.blocks),
            ("levels", self.levels),
            ("positions", self.positions),
        ];
        for (name, value) in dims {
            if !(1..=MAX_DIMENSION).contains(&value) {
                return Err(format!(
                    "仓库维度 {} 必须在 [1, {}] 内, 实际 {}",
                    name, MAX_DIMENSION, value
                ));
            }
        }
        Ok(())
    }
}

impl Default for WarehouseGeometry {
    fn default() -> Self {
        Self {
            deposits: 1,
            alleys: 10,
            blocks: 10,
            levels: 4,
            positions: 10,
        }
    }
}

// ==========================================
// ClassAlleyMap - 分类巷道池
// ==========================================
// 巷道池可为空、可重叠、可不连续,不假设互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassAlleyMap {
    #[serde(rename = "A")]
    pub a: Vec<u32>,
    #[serde(rename = "B")]
    pub b: Vec<u32>,
    #[serde(rename = "C")]
    pub c: Vec<u32>,
}

impl ClassAlleyMap {
    pub fn new(a: Vec<u32>, b: Vec<u32>, c: Vec<u32>) -> Self {
        Self { a, b, c }
    }

    /// 分类对应的巷道（保持配置顺序）
    pub fn alleys_for(&self, class: AbcClass) -> &[u32] {
        match class {
            AbcClass::A => &self.a,
            AbcClass::B => &self.b,
            AbcClass::C => &self.c,
        }
    }

    /// 校验巷道号落在 [1, alley_count]
    pub fn validate(&self, alley_count: u32) -> Result<(), String> {
        for class in AbcClass::ALL {
            if let Some(bad) = self
                .alleys_for(class)
                .iter()
                .find(|&&alley| alley < 1 || alley > alley_count)
            {
                return Err(format!(
                    "{} 类巷道 {} 超出范围 [1, {}]",
                    class, bad, alley_count
                ));
            }
        }
        Ok(())
    }
}

impl Default for ClassAlleyMap {
    fn default() -> Self {
        Self {
            a: vec![1, 2],
            b: vec![3, 4, 5],
            c: (6..=10).collect(),
        }
    }
}

// ==========================================
// SlotCoordinate - 货位坐标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotCoordinate {
    pub deposit: u32,
    pub alley: u32,
    pub block: u32,
    pub level: u32,
    pub position: u32,
}

impl fmt::Display for SlotCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}.{:02}.{:02}.{:02}",
            self.deposit, self.alley, self.block, self.level, self.position
        )
    }
}

impl FromStr for SlotCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 5 {
            return Err(format!("货位格式错误: {}", s));
        }
        let mut nums = [0u32; 5];
        for (slot, part) in nums.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse::<u32>()
                .map_err(|e| format!("货位格式错误: {} ({})", s, e))?;
        }
        Ok(Self {
            deposit: nums[0],
            alley: nums[1],
            block: nums[2],
            level: nums[3],
            position: nums[4],
        })
    }
}

// ==========================================
// Location - 货位分配结果
// ==========================================
// 单行失败以哨兵值内联记录,不中断整批
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Assigned(SlotCoordinate),
    NoLocationAvailable,
    CollisionExhausted,
}

impl Location {
    pub fn is_assigned(&self) -> bool {
        matches!(self, Location::Assigned(_))
    }

    pub fn coordinate(&self) -> Option<&SlotCoordinate> {
        match self {
            Location::Assigned(coord) => Some(coord),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Assigned(coord) => write!(f, "{}", coord),
            Location::NoLocationAvailable => write!(f, "{}", NO_LOCATION_AVAILABLE),
            Location::CollisionExhausted => write!(f, "{}", COLLISION_EXHAUSTED),
        }
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            NO_LOCATION_AVAILABLE => Ok(Location::NoLocationAvailable),
            COLLISION_EXHAUSTED => Ok(Location::CollisionExhausted),
            other => other.parse().map(Location::Assigned),
        }
    }
}

// 序列化为与导出一致的文本
impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_coordinate_format() {
        let coord = SlotCoordinate {
            deposit: 12,
            alley: 3,
            block: 10,
            level: 1,
            position: 7,
        };
        assert_eq!(coord.to_string(), "12.03.10.01.07");
        assert_eq!("12.03.10.01.07".parse::<SlotCoordinate>().unwrap(), coord);
    }

    #[test]
    fn test_location_sentinels_render_distinctly() {
        assert_eq!(Location::NoLocationAvailable.to_string(), "no location available");
        assert_eq!(
            Location::CollisionExhausted.to_string(),
            "collision: no available location found"
        );
        assert_eq!(
            "no location available".parse::<Location>().unwrap(),
            Location::NoLocationAvailable
        );
        assert!(!Location::CollisionExhausted.is_assigned());
    }

    #[test]
    fn test_geometry_validate() {
        assert!(WarehouseGeometry::default().validate().is_ok());
        let bad = WarehouseGeometry {
            levels: 0,
            ..WarehouseGeometry::default()
        };
        assert!(bad.validate().unwrap_err().contains("levels"));
        assert_eq!(WarehouseGeometry::default().positions_per_alley(), 400);
    }

    #[test]
    fn test_geometry_rejects_oversized_dimension() {
        let huge = WarehouseGeometry {
            positions: u32::MAX,
            ..WarehouseGeometry::default()
        };
        assert!(huge.validate().unwrap_err().contains("positions"));

        let edge = WarehouseGeometry {
            blocks: MAX_DIMENSION,
            levels: MAX_DIMENSION,
            positions: MAX_DIMENSION,
            ..WarehouseGeometry::default()
        };
        assert!(edge.validate().is_ok());
        assert_eq!(
            edge.positions_per_alley(),
            (MAX_DIMENSION as usize).pow(3)
        );
    }

    #[test]
    fn test_alley_map_validate_range() {
        let map = ClassAlleyMap::default();
        assert!(map.validate(10).is_ok());
        assert!(map.validate(9).is_err());

        let zero = ClassAlleyMap::new(vec![0], vec![], vec![]);
        assert!(zero.validate(10).is_err());
    }
}
