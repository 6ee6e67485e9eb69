// ==========================================
// 重工业生产数据生成器 - 引擎层
// ==========================================
// 职责: 产量模型、实绩/目标生成、分批落库、流程编排
// 红线: Engine 不拼 SQL, 随机源一律由外部注入
// ==========================================

pub mod batch_persister;
pub mod distribution;
pub mod error;
pub mod orchestrator;
pub mod shift_generator;
pub mod target_generator;
pub mod yield_model;

// 重导出核心引擎
pub use batch_persister::BatchPersister;
pub use distribution::WeightedChoice;
pub use error::{GeneratorError, GeneratorResult};
pub use orchestrator::{GenerationOrchestrator, GenerationSummary};
pub use shift_generator::ShiftRecordGenerator;
pub use target_generator::AnnualTargetGenerator;
pub use yield_model::{DailyYieldModel, ShiftConditions, ShiftOutput, StructuralFactors};
