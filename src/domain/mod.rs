// ==========================================
// 重工业生产数据生成器 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod production;
pub mod types;

// 重导出核心类型
pub use catalog::{Facility, FacilityProductCatalog, FacilityProductPair, Product};
pub use production::{round2, ProductionRecord, ProductionTarget};
pub use types::{FacilityType, PerformanceProfile, ProductCategory, QualityGrade};
