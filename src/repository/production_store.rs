// ==========================================
// 重工业生产数据生成器 - 生产数据写入 Trait
// ==========================================
// 职责: 定义生成结果的落库接口（不包含业务逻辑）
// 红线: 自然键冲突 → 跳过，不报错、不覆盖
// 实现者: SqliteProductionStore / InMemoryProductionStore
// ==========================================

use crate::domain::production::{ProductionRecord, ProductionTarget};
use crate::domain::types::ProductCategory;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

// ==========================================
// BatchOutcome - 单批写入结果
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub skipped: usize, // 因自然键冲突跳过
}

impl BatchOutcome {
    pub fn merge(&mut self, other: BatchOutcome) {
        self.inserted += other.inserted;
        self.skipped += other.skipped;
    }

    pub fn total(&self) -> usize {
        self.inserted + self.skipped
    }
}

// ==========================================
// ProductionStatistics - 库内汇总统计
// ==========================================
// 只用于展示，不影响生成流程
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionStatistics {
    pub total_records: u64,
    pub total_targets: u64,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub category_averages: BTreeMap<ProductCategory, f64>, // 各类别平均班产量
    pub mean_completion_rate: Option<f64>,                 // 月度计划完成率均值 (%)
}

// ==========================================
// ProductionStore Trait
// ==========================================
pub trait ProductionStore {
    /// 写入一批生产实绩（单事务）
    ///
    /// # 返回
    /// - Ok(BatchOutcome): 插入/跳过数
    /// - Err: 数据库错误（本批回滚，之前已提交的批次保留）
    fn append_records(&self, records: &[ProductionRecord]) -> RepositoryResult<BatchOutcome>;

    /// 写入一批计划目标（单事务）
    ///
    /// 冲突键: (facility_id, product_id, plan_year, month)
    fn append_targets(&self, targets: &[ProductionTarget]) -> RepositoryResult<BatchOutcome>;

    /// 汇总统计
    fn statistics(&self) -> RepositoryResult<ProductionStatistics>;
}

/// 月度完成率 (%)：实绩 / 目标 × 100，目标为 0 的月份不参与
pub(crate) fn completion_percentage(actual: f64, target: f64) -> Option<f64> {
    if target > 0.0 {
        Some(actual * 100.0 / target)
    } else {
        None
    }
}
