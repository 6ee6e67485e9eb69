// ==========================================
// 重工业生产数据生成器 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 生成引擎错误类型
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("离散分布权重无效: {0}")]
    InvalidDistribution(String),

    #[error("计划期无效: start={start}, end={end}")]
    InvalidPlanWindow { start: String, end: String },

    #[error("计划年度无效: {0}")]
    InvalidPlanYear(i32),

    #[error("配置错误 (key={key}): {message}")]
    ConfigError { key: String, message: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<rusqlite::Error> for GeneratorError {
    fn from(err: rusqlite::Error) -> Self {
        GeneratorError::Repository(RepositoryError::from(err))
    }
}

/// Result 类型别名
pub type GeneratorResult<T> = Result<T, GeneratorError>;
