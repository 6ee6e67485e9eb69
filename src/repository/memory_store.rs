// ==========================================
// 重工业生产数据生成器 - 内存仓储
// ==========================================
// 用途: 单元测试 / 试运行，不依赖数据库驱动
// 语义与 SqliteProductionStore 一致: 自然键冲突跳过
// ==========================================

use crate::domain::catalog::FacilityProductCatalog;
use crate::domain::production::{round2, ProductionRecord, ProductionTarget};
use crate::domain::types::ProductCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::production_store::{
    completion_percentage, BatchOutcome, ProductionStatistics, ProductionStore,
};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

type RecordKey = (i64, i64, NaiveDate, u8);
type TargetKey = (i64, i64, i32, Option<u32>);

#[derive(Default)]
struct MemoryTables {
    records: BTreeMap<RecordKey, ProductionRecord>,
    targets: BTreeMap<TargetKey, ProductionTarget>,
}

/// 内存版生产数据仓储
#[derive(Default)]
pub struct InMemoryProductionStore {
    tables: Mutex<MemoryTables>,
    product_categories: HashMap<i64, ProductCategory>,
}

impl InMemoryProductionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带目录创建（统计类别均值时需要 product → category 映射）
    pub fn with_catalog(catalog: &FacilityProductCatalog) -> Self {
        Self {
            tables: Mutex::new(MemoryTables::default()),
            product_categories: catalog
                .pairs()
                .iter()
                .map(|p| (p.product_id, p.product_category))
                .collect(),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, MemoryTables>> {
        self.tables
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 当前全部生产实绩（按自然键排序）
    pub fn records(&self) -> RepositoryResult<Vec<ProductionRecord>> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    /// 当前全部计划目标（按唯一键排序）
    pub fn targets(&self) -> RepositoryResult<Vec<ProductionTarget>> {
        Ok(self.lock()?.targets.values().cloned().collect())
    }
}

impl ProductionStore for InMemoryProductionStore {
    fn append_records(&self, records: &[ProductionRecord]) -> RepositoryResult<BatchOutcome> {
        let mut tables = self.lock()?;
        let mut outcome = BatchOutcome::default();

        for record in records {
            let key = record.natural_key();
            if tables.records.contains_key(&key) {
                outcome.skipped += 1;
            } else {
                tables.records.insert(key, record.clone());
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }

    fn append_targets(&self, targets: &[ProductionTarget]) -> RepositoryResult<BatchOutcome> {
        let mut tables = self.lock()?;
        let mut outcome = BatchOutcome::default();

        for target in targets {
            let key = target.natural_key();
            if tables.targets.contains_key(&key) {
                outcome.skipped += 1;
            } else {
                tables.targets.insert(key, target.clone());
                outcome.inserted += 1;
            }
        }
        Ok(outcome)
    }

    fn statistics(&self) -> RepositoryResult<ProductionStatistics> {
        let tables = self.lock()?;

        let date_range = match (
            tables.records.values().map(|r| r.production_date).min(),
            tables.records.values().map(|r| r.production_date).max(),
        ) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        };

        let mut sums: BTreeMap<ProductCategory, (f64, u64)> = BTreeMap::new();
        let mut monthly_actual: HashMap<(i64, i64, i32, u32), f64> = HashMap::new();
        for record in tables.records.values() {
            if let Some(category) = self.product_categories.get(&record.product_id) {
                let entry = sums.entry(*category).or_insert((0.0, 0));
                entry.0 += record.quantity_produced;
                entry.1 += 1;
            }
            *monthly_actual
                .entry((
                    record.facility_id,
                    record.product_id,
                    record.production_date.year(),
                    record.production_date.month(),
                ))
                .or_insert(0.0) += record.quantity_produced;
        }

        let category_averages = sums
            .into_iter()
            .map(|(category, (sum, n))| (category, round2(sum / n as f64)))
            .collect();

        let rates: Vec<f64> = tables
            .targets
            .values()
            .filter_map(|t| {
                let month = t.month?;
                let actual = monthly_actual
                    .get(&(t.facility_id, t.product_id, t.plan_year, month))
                    .copied()
                    .unwrap_or(0.0);
                completion_percentage(actual, t.target_quantity).map(round2)
            })
            .collect();

        let mean_completion_rate = if rates.is_empty() {
            None
        } else {
            Some(round2(rates.iter().sum::<f64>() / rates.len() as f64))
        };

        Ok(ProductionStatistics {
            total_records: tables.records.len() as u64,
            total_targets: tables.targets.len() as u64,
            date_range,
            category_averages,
            mean_completion_rate,
        })
    }
}
