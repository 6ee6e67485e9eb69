// ==========================================
// 重工业生产数据生成器 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 为五年计划模拟伪造生产实绩与计划目标，幂等落库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 生成规则
pub mod engine;

// 配置层 - 生成参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建库脚本）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConfigManager, GeneratorConfig};

pub use domain::{
    FacilityProductCatalog, FacilityProductPair, PerformanceProfile, ProductCategory,
    ProductionRecord, ProductionTarget, QualityGrade,
};

pub use engine::{
    AnnualTargetGenerator, BatchPersister, DailyYieldModel, GenerationOrchestrator,
    GenerationSummary, GeneratorError, GeneratorResult, ShiftRecordGenerator, WeightedChoice,
};

pub use repository::{
    CatalogRepository, CatalogSource, InMemoryProductionStore, ProductionStore,
    RepositoryError, SqliteProductionStore,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "重工业生产数据生成器";
