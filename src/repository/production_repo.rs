// ==========================================
// 重工业生产数据生成器 - 生产实绩/计划目标 SQLite 仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 写入策略: INSERT ... ON CONFLICT DO NOTHING，单批单事务
// ==========================================

use crate::domain::production::{ProductionRecord, ProductionTarget};
use crate::domain::types::ProductCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::production_store::{BatchOutcome, ProductionStatistics, ProductionStore};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

const INSERT_RECORD_SQL: &str = r#"
    INSERT INTO actual_production (
        facility_id, product_id, production_date, quantity_produced,
        quality_grade, shift_number, workers_on_shift,
        equipment_downtime_hours, defect_count, notes, reported_by, reported_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    ON CONFLICT DO NOTHING
"#;

const INSERT_TARGET_SQL: &str = r#"
    INSERT INTO production_targets (
        facility_id, product_id, plan_year, quarter, month,
        target_quantity, target_set_date, notes
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT (facility_id, product_id, plan_year, month) DO NOTHING
"#;

// ==========================================
// SqliteProductionStore - 生产数据仓储
// ==========================================

/// 生产数据仓储
/// 职责: actual_production / production_targets 的批量写入与汇总查询
pub struct SqliteProductionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductionStore {
    /// 从已有连接创建仓储实例（与目录仓储共用同一长连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn count_rows(conn: &Connection, table: &str) -> RepositoryResult<u64> {
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(count.max(0) as u64)
    }

    fn query_date_range(conn: &Connection) -> RepositoryResult<Option<(NaiveDate, NaiveDate)>> {
        let (min, max): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(production_date), MAX(production_date) FROM actual_production",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(min), Some(max)) => {
                let parse = |s: &str| {
                    NaiveDate::parse_from_str(s, DATE_FMT).map_err(|e| {
                        RepositoryError::FieldValueError {
                            field: "production_date".to_string(),
                            message: format!("{}: {}", s, e),
                        }
                    })
                };
                Ok(Some((parse(&min)?, parse(&max)?)))
            }
            _ => Ok(None),
        }
    }

    fn query_category_averages(
        conn: &Connection,
    ) -> RepositoryResult<BTreeMap<ProductCategory, f64>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT p.product_category, ROUND(AVG(ap.quantity_produced), 2)
            FROM actual_production ap
            JOIN products p ON ap.product_id = p.product_id
            GROUP BY p.product_category
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
        })?;

        let mut averages = BTreeMap::new();
        for row in rows {
            let (category, avg) = row?;
            match (category.parse::<ProductCategory>(), avg) {
                (Ok(category), Some(avg)) => {
                    averages.insert(category, avg);
                }
                (Err(e), _) => warn!(error = %e, "统计时跳过未知产品类别"),
                _ => {}
            }
        }
        Ok(averages)
    }

    fn query_mean_completion_rate(conn: &Connection) -> RepositoryResult<Option<f64>> {
        let rate: Option<f64> = conn.query_row(
            "SELECT ROUND(AVG(completion_percentage), 2) FROM plan_vs_actual_monthly",
            [],
            |row| row.get(0),
        )?;
        Ok(rate)
    }
}

impl ProductionStore for SqliteProductionStore {
    fn append_records(&self, records: &[ProductionRecord]) -> RepositoryResult<BatchOutcome> {
        if records.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare_cached(INSERT_RECORD_SQL)?;
            for record in records {
                inserted += stmt.execute(params![
                    record.facility_id,
                    record.product_id,
                    record.production_date.format(DATE_FMT).to_string(),
                    record.quantity_produced,
                    record.quality_grade.as_str(),
                    record.shift_number,
                    record.workers_on_shift,
                    record.equipment_downtime_hours,
                    record.defect_count,
                    record.notes,
                    record.reported_by,
                    record.reported_at.format(DATETIME_FMT).to_string(),
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let outcome = BatchOutcome {
            inserted,
            skipped: records.len() - inserted,
        };
        debug!(
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "actual_production 批次已提交"
        );
        Ok(outcome)
    }

    fn append_targets(&self, targets: &[ProductionTarget]) -> RepositoryResult<BatchOutcome> {
        if targets.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut inserted = 0usize;
        {
            let mut stmt = tx.prepare_cached(INSERT_TARGET_SQL)?;
            for target in targets {
                inserted += stmt.execute(params![
                    target.facility_id,
                    target.product_id,
                    target.plan_year,
                    target.quarter,
                    target.month,
                    target.target_quantity,
                    target.target_set_date.format(DATE_FMT).to_string(),
                    target.notes,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let outcome = BatchOutcome {
            inserted,
            skipped: targets.len() - inserted,
        };
        debug!(
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "production_targets 批次已提交"
        );
        Ok(outcome)
    }

    fn statistics(&self) -> RepositoryResult<ProductionStatistics> {
        let conn = self.get_conn()?;

        Ok(ProductionStatistics {
            total_records: Self::count_rows(&conn, "actual_production")?,
            total_targets: Self::count_rows(&conn, "production_targets")?,
            date_range: Self::query_date_range(&conn)?,
            category_averages: Self::query_category_averages(&conn)?,
            mean_completion_rate: Self::query_mean_completion_rate(&conn)?,
        })
    }
}
