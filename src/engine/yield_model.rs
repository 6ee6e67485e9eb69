// ==========================================
// 重工业生产数据生成器 - 班产量模型
// ==========================================
// 职责: 由日期、班次基准产能、绩效画像计算单班产量/质量/停机/缺陷
// 模型: 七个因子连乘
//   季节 × 学习曲线 × 周末 × 日波动 × 设备故障 × 年末冲刺 × 节假日
// 红线: 产量不得为负；基准产能无效时输出 0，不传播 NaN
// ==========================================

use crate::domain::production::round2;
use crate::domain::types::{PerformanceProfile, QualityGrade};
use crate::engine::distribution::WeightedChoice;
use crate::engine::error::{GeneratorError, GeneratorResult};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;

// ===== 因子常量 =====
const SEASONAL_AMPLITUDE: f64 = 0.1;
const WEEKEND_FACTOR: f64 = 0.50;
const DAILY_VARIANCE_RANGE: (f64, f64) = (0.90, 1.10);
const BREAKDOWN_PROBABILITY: f64 = 0.02;
const BREAKDOWN_FACTOR: f64 = 0.30;
const BREAKDOWN_DOWNTIME_HOURS: (f64, f64) = (12.0, 20.0);
const NORMAL_DOWNTIME_HOURS: (f64, f64) = (0.0, 2.0);
const YEAR_END_PUSH_FACTOR: f64 = 1.15;
const HOLIDAY_FACTOR: f64 = 0.40;

/// 法定节日 (月, 日)：元旦、劳动节、胜利日、十月革命节
pub const HOLIDAYS: [(u32, u32); 4] = [(1, 1), (5, 1), (5, 9), (11, 7)];

// ===== 质量等级权重 =====
const NORMAL_QUALITY_WEIGHTS: [(QualityGrade, f64); 3] = [
    (QualityGrade::A, 0.70),
    (QualityGrade::B, 0.25),
    (QualityGrade::C, 0.05),
];
// 设备故障或年末冲刺共用一张降级表（不叠加）
const DEGRADED_QUALITY_WEIGHTS: [(QualityGrade, f64); 3] = [
    (QualityGrade::A, 0.50),
    (QualityGrade::B, 0.35),
    (QualityGrade::C, 0.15),
];

// ===== 缺陷率 =====
const BASE_DEFECT_RATE: f64 = 0.002;
const YEAR_END_DEFECT_RATE: f64 = 0.008;
const BREAKDOWN_DEFECT_RATE: f64 = 0.015;

// ==========================================
// StructuralFactors - 确定性因子
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StructuralFactors {
    pub seasonal: f64,
    pub learning: f64,
    pub weekend: f64,
    pub year_end: f64,
    pub holiday: f64,
}

impl StructuralFactors {
    pub fn product(&self) -> f64 {
        self.seasonal * self.learning * self.weekend * self.year_end * self.holiday
    }

    pub fn year_end_push(&self) -> bool {
        self.year_end > 1.0
    }
}

// ==========================================
// ShiftConditions - 单班随机工况
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftConditions {
    pub daily_variance: f64,
    pub breakdown: bool,
    pub downtime_hours: f64,
}

impl ShiftConditions {
    /// 无波动、无故障、无停机
    pub fn nominal() -> Self {
        Self {
            daily_variance: 1.0,
            breakdown: false,
            downtime_hours: 0.0,
        }
    }

    pub fn breakdown_factor(&self) -> f64 {
        if self.breakdown {
            BREAKDOWN_FACTOR
        } else {
            1.0
        }
    }
}

// ==========================================
// ShiftOutput - 单班产出
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftOutput {
    pub quantity: f64,
    pub quality_grade: QualityGrade,
    pub downtime_hours: f64,
    pub defect_count: u32,
    pub is_breakdown: bool,
}

// ==========================================
// DailyYieldModel - 班产量模型
// ==========================================
#[derive(Debug, Clone)]
pub struct DailyYieldModel {
    plan_start: NaiveDate,
    plan_end: NaiveDate,
    normal_quality: WeightedChoice<QualityGrade>,
    degraded_quality: WeightedChoice<QualityGrade>,
}

impl DailyYieldModel {
    /// 创建班产量模型
    ///
    /// # 参数
    /// - plan_start / plan_end: 计划期（学习曲线的起止点）
    pub fn new(plan_start: NaiveDate, plan_end: NaiveDate) -> GeneratorResult<Self> {
        if plan_end <= plan_start {
            return Err(GeneratorError::InvalidPlanWindow {
                start: plan_start.to_string(),
                end: plan_end.to_string(),
            });
        }

        Ok(Self {
            plan_start,
            plan_end,
            normal_quality: WeightedChoice::new(&NORMAL_QUALITY_WEIGHTS)?,
            degraded_quality: WeightedChoice::new(&DEGRADED_QUALITY_WEIGHTS)?,
        })
    }

    /// 计划期进度 [0, 1]，计划期外的日期截断到端点
    pub fn year_progress(&self, date: NaiveDate) -> f64 {
        let elapsed = (date - self.plan_start).num_days() as f64;
        let total = (self.plan_end - self.plan_start).num_days() as f64;
        (elapsed / total).clamp(0.0, 1.0)
    }

    /// 计算确定性因子
    pub fn structural_factors(
        &self,
        date: NaiveDate,
        profile: PerformanceProfile,
    ) -> StructuralFactors {
        let day_of_year = date.ordinal() as f64;
        let seasonal = 1.0 + SEASONAL_AMPLITUDE * (2.0 * PI * day_of_year / 365.0).sin();

        let (lower, upper) = profile.learning_bounds();
        let learning = lower + self.year_progress(date) * (upper - lower);

        let weekend = match date.weekday() {
            Weekday::Sat | Weekday::Sun => WEEKEND_FACTOR,
            _ => 1.0,
        };

        let year_end = if date.month() == 12 {
            YEAR_END_PUSH_FACTOR
        } else {
            1.0
        };

        let holiday = if is_holiday(date) { HOLIDAY_FACTOR } else { 1.0 };

        StructuralFactors {
            seasonal,
            learning,
            weekend,
            year_end,
            holiday,
        }
    }

    /// 抽取单班随机工况（日波动 → 故障 → 停机时长）
    pub fn draw_conditions<R: Rng + ?Sized>(&self, rng: &mut R) -> ShiftConditions {
        let daily_variance = rng.gen_range(DAILY_VARIANCE_RANGE.0..=DAILY_VARIANCE_RANGE.1);
        let breakdown = rng.gen_bool(BREAKDOWN_PROBABILITY);
        let (lo, hi) = if breakdown {
            BREAKDOWN_DOWNTIME_HOURS
        } else {
            NORMAL_DOWNTIME_HOURS
        };
        let downtime_hours = rng.gen_range(lo..=hi);

        ShiftConditions {
            daily_variance,
            breakdown,
            downtime_hours,
        }
    }

    /// 给定工况计算单班产出（质量等级仍从 rng 抽取）
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        base_capacity_for_shift: f64,
        profile: PerformanceProfile,
        conditions: ShiftConditions,
        rng: &mut R,
    ) -> ShiftOutput {
        let factors = self.structural_factors(date, profile);
        let year_end_push = factors.year_end_push();

        let raw_quantity = if base_capacity_for_shift.is_finite() && base_capacity_for_shift > 0.0
        {
            base_capacity_for_shift
                * factors.product()
                * conditions.daily_variance
                * conditions.breakdown_factor()
        } else {
            0.0
        };

        let quality_grade = self
            .quality_distribution(conditions.breakdown || year_end_push)
            .sample(rng);

        let defect_rate = if conditions.breakdown {
            BREAKDOWN_DEFECT_RATE
        } else if year_end_push {
            YEAR_END_DEFECT_RATE
        } else {
            BASE_DEFECT_RATE
        };

        ShiftOutput {
            quantity: round2(raw_quantity),
            quality_grade,
            downtime_hours: round2(conditions.downtime_hours),
            defect_count: (raw_quantity * defect_rate).floor() as u32,
            is_breakdown: conditions.breakdown,
        }
    }

    /// 模拟一个班次: 抽取工况 + 计算产出
    pub fn simulate_shift<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        base_capacity_for_shift: f64,
        profile: PerformanceProfile,
        rng: &mut R,
    ) -> ShiftOutput {
        let conditions = self.draw_conditions(rng);
        self.evaluate(date, base_capacity_for_shift, profile, conditions, rng)
    }

    /// 质量等级分布；degraded = 故障或年末冲刺
    pub fn quality_distribution(&self, degraded: bool) -> &WeightedChoice<QualityGrade> {
        if degraded {
            &self.degraded_quality
        } else {
            &self.normal_quality
        }
    }
}

/// 是否法定节日（任意年份）
pub fn is_holiday(date: NaiveDate) -> bool {
    HOLIDAYS.contains(&(date.month(), date.day()))
}
