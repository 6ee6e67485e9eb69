// ==========================================
// 重工业生产数据生成器 - 分批落库
// ==========================================
// 策略:
// - 生产实绩每批 1000 条，计划目标每批 100 条
// - 每批一个事务，成功即提交；失败时只丢当前批，已提交批次保留
// - 自然键冲突跳过（重复执行同一年度不会新增任何行）
// ==========================================

use crate::domain::production::{ProductionRecord, ProductionTarget};
use crate::repository::{BatchOutcome, ProductionStore, RepositoryResult};
use tracing::{debug, info};

/// 生产实绩默认批大小
pub const DEFAULT_RECORD_BATCH_SIZE: usize = 1000;

/// 计划目标默认批大小
pub const DEFAULT_TARGET_BATCH_SIZE: usize = 100;

// ==========================================
// BatchPersister - 分批写入器
// ==========================================
pub struct BatchPersister<'a, S: ProductionStore + ?Sized> {
    store: &'a S,
    record_batch_size: usize,
    target_batch_size: usize,
}

impl<'a, S: ProductionStore + ?Sized> BatchPersister<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self::with_batch_sizes(store, DEFAULT_RECORD_BATCH_SIZE, DEFAULT_TARGET_BATCH_SIZE)
    }

    /// 自定义批大小（0 视为 1）
    pub fn with_batch_sizes(
        store: &'a S,
        record_batch_size: usize,
        target_batch_size: usize,
    ) -> Self {
        Self {
            store,
            record_batch_size: record_batch_size.max(1),
            target_batch_size: target_batch_size.max(1),
        }
    }

    /// 分批写入生产实绩
    pub fn persist_records(&self, records: &[ProductionRecord]) -> RepositoryResult<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for (batch_no, chunk) in records.chunks(self.record_batch_size).enumerate() {
            let batch = self.store.append_records(chunk)?;
            debug!(
                batch_no,
                size = chunk.len(),
                inserted = batch.inserted,
                skipped = batch.skipped,
                "生产实绩批次完成"
            );
            outcome.merge(batch);
        }

        info!(
            total = records.len(),
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "生产实绩写入完成"
        );
        Ok(outcome)
    }

    /// 分批写入计划目标
    pub fn persist_targets(&self, targets: &[ProductionTarget]) -> RepositoryResult<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for (batch_no, chunk) in targets.chunks(self.target_batch_size).enumerate() {
            let batch = self.store.append_targets(chunk)?;
            debug!(
                batch_no,
                size = chunk.len(),
                inserted = batch.inserted,
                skipped = batch.skipped,
                "计划目标批次完成"
            );
            outcome.merge(batch);
        }

        info!(
            total = targets.len(),
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "计划目标写入完成"
        );
        Ok(outcome)
    }
}
