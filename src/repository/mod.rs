// ==========================================
// 重工业生产数据生成器 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod catalog_repo;
pub mod error;
pub mod memory_store;
pub mod production_repo;
pub mod production_store;

// 重导出核心仓储
pub use catalog_repo::{CatalogRepository, CatalogSource, StaticCatalogSource};
pub use error::{RepositoryError, RepositoryResult};
pub use memory_store::InMemoryProductionStore;
pub use production_repo::SqliteProductionStore;
pub use production_store::{BatchOutcome, ProductionStatistics, ProductionStore};
