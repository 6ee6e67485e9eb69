// ==========================================
// 重工业生产数据生成器 - 配置层
// ==========================================
// 职责: 生成参数默认值 + config_kv / 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod generator_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager};
pub use generator_config::{default_db_path, GeneratorConfig, DEFAULT_DRY_RUN_YEAR};
