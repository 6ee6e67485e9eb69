// ==========================================
// 重工业生产数据生成器 - 领域类型定义
// ==========================================
// 职责: 设施类型、产品类别、绩效画像、质量等级
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 设施类型 (Facility Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    SteelMill,        // 钢铁厂
    MachineryFactory, // 机械厂
    TankPlant,        // 坦克厂
}

impl FacilityType {
    /// 设施类型与产品类别的兼容规则
    ///
    /// - STEEL_MILL ↔ STEEL
    /// - MACHINERY_FACTORY ↔ MACHINERY
    /// - TANK_PLANT ↔ ARMAMENTS
    pub fn produces(&self, category: ProductCategory) -> bool {
        matches!(
            (self, category),
            (FacilityType::SteelMill, ProductCategory::Steel)
                | (FacilityType::MachineryFactory, ProductCategory::Machinery)
                | (FacilityType::TankPlant, ProductCategory::Armaments)
        )
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityType::SteelMill => write!(f, "STEEL_MILL"),
            FacilityType::MachineryFactory => write!(f, "MACHINERY_FACTORY"),
            FacilityType::TankPlant => write!(f, "TANK_PLANT"),
        }
    }
}

impl FromStr for FacilityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STEEL_MILL" => Ok(FacilityType::SteelMill),
            "MACHINERY_FACTORY" => Ok(FacilityType::MachineryFactory),
            "TANK_PLANT" => Ok(FacilityType::TankPlant),
            other => Err(format!("未知设施类型: {}", other)),
        }
    }
}

// ==========================================
// 产品类别 (Product Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Steel,     // 钢材（吨）
    Machinery, // 机械（台）
    Armaments, // 军备（辆）
}

impl ProductCategory {
    /// 日产能折算系数
    ///
    /// 钢铁厂同时生产多个品种，单品种只分到 30% 产能；
    /// 机械与军备按单位计数，不折算。
    pub fn capacity_multiplier(&self) -> f64 {
        match self {
            ProductCategory::Steel => 0.3,
            ProductCategory::Machinery => 1.0,
            ProductCategory::Armaments => 1.0,
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCategory::Steel => write!(f, "STEEL"),
            ProductCategory::Machinery => write!(f, "MACHINERY"),
            ProductCategory::Armaments => write!(f, "ARMAMENTS"),
        }
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STEEL" => Ok(ProductCategory::Steel),
            "MACHINERY" => Ok(ProductCategory::Machinery),
            "ARMAMENTS" => Ok(ProductCategory::Armaments),
            other => Err(format!("未知产品类别: {}", other)),
        }
    }
}

// ==========================================
// 绩效画像 (Performance Profile)
// ==========================================
// 每个计划年度为每个设施-产品对重新抽取，不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerformanceProfile {
    HighPerformer, // 先进
    Average,       // 一般
    Struggling,    // 落后
}

impl PerformanceProfile {
    /// 学习曲线区间 (计划期初系数, 计划期末系数)
    pub fn learning_bounds(&self) -> (f64, f64) {
        match self {
            PerformanceProfile::HighPerformer => (0.90, 1.10),
            PerformanceProfile::Average => (0.75, 0.95),
            PerformanceProfile::Struggling => (0.60, 0.85),
        }
    }
}

impl fmt::Display for PerformanceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceProfile::HighPerformer => write!(f, "HIGH_PERFORMER"),
            PerformanceProfile::Average => write!(f, "AVERAGE"),
            PerformanceProfile::Struggling => write!(f, "STRUGGLING"),
        }
    }
}

// ==========================================
// 质量等级 (Quality Grade)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityGrade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(QualityGrade::A),
            "B" => Ok(QualityGrade::B),
            "C" => Ok(QualityGrade::C),
            other => Err(format!("未知质量等级: {}", other)),
        }
    }
}
