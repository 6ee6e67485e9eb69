// ==========================================
// 重工业生产数据生成器 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表读取生成参数覆写
// 存储: config_kv 表 (scope_id='global')，表不存在时全部取默认值
// ==========================================

use crate::config::generator_config::GeneratorConfig;
use crate::db::table_exists;
use crate::engine::error::{GeneratorError, GeneratorResult};
use crate::repository::RepositoryError;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 配置键
pub mod config_keys {
    pub const PLAN_START: &str = "generator/plan_start";
    pub const PLAN_END: &str = "generator/plan_end";
    pub const SEED: &str = "generator/seed";
    pub const RECORD_BATCH_SIZE: &str = "generator/record_batch_size";
    pub const TARGET_BATCH_SIZE: &str = "generator/target_batch_size";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在或 config_kv 表不存在
    pub fn get_global_config_value(&self, key: &str) -> GeneratorResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        if !table_exists(&conn, "config_kv")? {
            return Ok(None);
        }

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_parsed<T: FromStr>(&self, key: &str) -> GeneratorResult<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        match self.get_global_config_value(key)? {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| GeneratorError::ConfigError {
                    key: key.to_string(),
                    message: format!("{} ({})", e, raw),
                }),
            None => Ok(None),
        }
    }

    /// 在默认参数上叠加 config_kv 覆写
    pub fn load_generator_config(&self) -> GeneratorResult<GeneratorConfig> {
        let mut config = GeneratorConfig::default();

        if let Some(v) = self.get_parsed::<NaiveDate>(config_keys::PLAN_START)? {
            config.plan_start = v;
        }
        if let Some(v) = self.get_parsed::<NaiveDate>(config_keys::PLAN_END)? {
            config.plan_end = v;
        }
        if let Some(v) = self.get_parsed::<u64>(config_keys::SEED)? {
            config.seed = Some(v);
        }
        if let Some(v) = self.get_parsed::<usize>(config_keys::RECORD_BATCH_SIZE)? {
            config.record_batch_size = v;
        }
        if let Some(v) = self.get_parsed::<usize>(config_keys::TARGET_BATCH_SIZE)? {
            config.target_batch_size = v;
        }

        if config.plan_end <= config.plan_start {
            return Err(GeneratorError::InvalidPlanWindow {
                start: config.plan_start.to_string(),
                end: config.plan_end.to_string(),
            });
        }

        debug!(?config, "生成参数加载完成");
        Ok(config)
    }
}
