// ==========================================
// 重工业生产数据生成器 - 生成参数
// ==========================================
// 默认值即五年计划口径 (1986-1990)；可由 config_kv / 环境变量覆写
// ==========================================

use crate::engine::batch_persister::{DEFAULT_RECORD_BATCH_SIZE, DEFAULT_TARGET_BATCH_SIZE};
use crate::engine::error::{GeneratorError, GeneratorResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 环境变量: 数据库路径
pub const ENV_DB_PATH: &str = "HEAVY_INDUSTRY_DB_PATH";

/// 环境变量: 随机种子
pub const ENV_SEED: &str = "HEAVY_INDUSTRY_SEED";

/// 未指定年度时的试运行年度
pub const DEFAULT_DRY_RUN_YEAR: i32 = 1986;

// ==========================================
// GeneratorConfig - 生成参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub plan_start: NaiveDate,
    pub plan_end: NaiveDate,
    pub record_batch_size: usize,
    pub target_batch_size: usize,
    pub seed: Option<u64>, // None: 运行时随机取种并写日志
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            plan_start: NaiveDate::from_ymd_opt(1986, 1, 1).unwrap_or_default(),
            plan_end: NaiveDate::from_ymd_opt(1990, 12, 31).unwrap_or_default(),
            record_batch_size: DEFAULT_RECORD_BATCH_SIZE,
            target_batch_size: DEFAULT_TARGET_BATCH_SIZE,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 应用环境变量覆写（目前只有种子）
    ///
    /// 种子无法解析时返回 ConfigError，不回退到随机种子
    pub fn with_env_overrides(self) -> GeneratorResult<Self> {
        let raw = std::env::var(ENV_SEED).ok();
        self.with_seed_override(ENV_SEED, raw.as_deref())
    }

    /// 用字符串覆写种子；None 或空白表示不覆写
    pub fn with_seed_override(mut self, key: &str, raw: Option<&str>) -> GeneratorResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self);
        };

        let seed = raw
            .parse::<u64>()
            .map_err(|e| GeneratorError::ConfigError {
                key: key.to_string(),
                message: format!("{} ({})", e, raw),
            })?;
        self.seed = Some(seed);
        Ok(self)
    }
}

/// 默认数据库路径
///
/// 优先 `HEAVY_INDUSTRY_DB_PATH`，否则放在用户数据目录
pub fn default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./heavy_industry.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("heavy-industry-datagen");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("heavy_industry.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_five_year_plan() {
        let config = GeneratorConfig::default();
        assert_eq!(config.plan_start, NaiveDate::from_ymd_opt(1986, 1, 1).unwrap());
        assert_eq!(config.plan_end, NaiveDate::from_ymd_opt(1990, 12, 31).unwrap());
        assert_eq!(config.record_batch_size, 1000);
        assert_eq!(config.target_batch_size, 100);
        assert_eq!(config.seed, None);
        assert_eq!(config.with_seed(7).seed, Some(7));
    }

    #[test]
    fn test_seed_override_parses_value() {
        let config = GeneratorConfig::default()
            .with_seed_override(ENV_SEED, Some(" 19860101 "))
            .unwrap();
        assert_eq!(config.seed, Some(19860101));
    }

    #[test]
    fn test_seed_override_blank_keeps_existing() {
        let config = GeneratorConfig::default().with_seed(3);
        assert_eq!(
            config.clone().with_seed_override(ENV_SEED, None).unwrap().seed,
            Some(3)
        );
        assert_eq!(
            config.with_seed_override(ENV_SEED, Some("  ")).unwrap().seed,
            Some(3)
        );
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let err = GeneratorConfig::default()
            .with_seed_override(ENV_SEED, Some("12x"))
            .unwrap_err();
        match err {
            GeneratorError::ConfigError { key, message } => {
                assert_eq!(key, ENV_SEED);
                assert!(message.contains("12x"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_env_seed_malformed_value_fails() {
        // 唯一读写 HEAVY_INDUSTRY_SEED 的测试
        std::env::set_var(ENV_SEED, "12x");
        let result = GeneratorConfig::default().with_env_overrides();
        std::env::set_var(ENV_SEED, "42");
        let ok = GeneratorConfig::default().with_env_overrides();
        std::env::remove_var(ENV_SEED);

        assert!(matches!(result, Err(GeneratorError::ConfigError { .. })));
        assert_eq!(ok.unwrap().seed, Some(42));
    }
}
