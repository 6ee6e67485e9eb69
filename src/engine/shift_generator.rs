// ==========================================
// 重工业生产数据生成器 - 班次实绩生成器
// ==========================================
// 职责: 设施-产品对 × 日期区间 × 三班 → 生产实绩记录
// 输出: 一次性物化的 Vec（下游按完整区间分批落库）
// ==========================================

use crate::domain::catalog::FacilityProductPair;
use crate::domain::production::ProductionRecord;
use crate::domain::types::PerformanceProfile;
use crate::engine::yield_model::DailyYieldModel;
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

/// 每日班次
pub const SHIFTS: [u8; 3] = [1, 2, 3];

/// 每班时长（小时），报工时间 = 生产日期 + 8h × 班次
pub const SHIFT_HOURS: i64 = 8;

const WORKER_VARIANCE_RANGE: (f64, f64) = (0.90, 1.10);

/// 报工人名册
pub const REPORTERS: [&str; 8] = [
    "V. Petrov",
    "A. Ivanov",
    "N. Sokolov",
    "M. Volkov",
    "D. Kuznetsov",
    "S. Fedorov",
    "I. Popov",
    "O. Smirnov",
];

// ==========================================
// ShiftRecordGenerator - 班次实绩生成器
// ==========================================
pub struct ShiftRecordGenerator<'a> {
    model: &'a DailyYieldModel,
}

impl<'a> ShiftRecordGenerator<'a> {
    pub fn new(model: &'a DailyYieldModel) -> Self {
        Self { model }
    }

    /// 生成 [start, end] 区间内每天三班的实绩
    ///
    /// start > end 时返回空列表
    #[instrument(
        skip(self, pair, rng),
        fields(facility_id = pair.facility_id, product_id = pair.product_id)
    )]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        pair: &FacilityProductPair,
        start: NaiveDate,
        end: NaiveDate,
        profile: PerformanceProfile,
        rng: &mut R,
    ) -> Vec<ProductionRecord> {
        if start > end {
            return Vec::new();
        }

        let days = (end - start).num_days() as usize + 1;
        let mut records = Vec::with_capacity(days * SHIFTS.len());

        let base_capacity = pair.adjusted_daily_capacity();
        let base_capacity_for_shift = base_capacity / SHIFTS.len() as f64;

        for date in start.iter_days().take(days) {
            for shift in SHIFTS {
                let output = self
                    .model
                    .simulate_shift(date, base_capacity_for_shift, profile, rng);

                let workers_on_shift = (pair.workforce_size as f64 / SHIFTS.len() as f64
                    * rng.gen_range(WORKER_VARIANCE_RANGE.0..=WORKER_VARIANCE_RANGE.1))
                .round() as u32;

                let reported_by = REPORTERS
                    .choose(rng)
                    .copied()
                    .unwrap_or(REPORTERS[0])
                    .to_string();

                records.push(ProductionRecord {
                    facility_id: pair.facility_id,
                    product_id: pair.product_id,
                    production_date: date,
                    quantity_produced: output.quantity,
                    quality_grade: output.quality_grade,
                    shift_number: shift,
                    workers_on_shift,
                    equipment_downtime_hours: output.downtime_hours,
                    defect_count: output.defect_count,
                    notes: format!("Daily production report - Shift {}", shift),
                    reported_by,
                    reported_at: date.and_time(NaiveTime::MIN)
                        + Duration::hours(SHIFT_HOURS * shift as i64),
                });
            }
        }

        records
    }
}
