// ==========================================
// 重工业生产数据生成器 - 年度计划目标生成器
// ==========================================
// 规则:
// - 年度目标 = 折算日产能 × 365 × 1.10（高于实际可持续产能 10%）
// - 月度目标按当月天数分摊（不是简单除以 12）
// - 闰年规则沿用 year % 4 == 0（不做格里高利世纪年修正）
// - 目标下达日期固定为上一年 12 月 1 日
// ==========================================

use crate::domain::catalog::FacilityProductPair;
use crate::domain::production::{round2, ProductionTarget};
use crate::engine::error::{GeneratorError, GeneratorResult};
use chrono::NaiveDate;

/// 计划目标相对可持续产能的上浮倍数
pub const TARGET_MULTIPLIER: f64 = 1.10;

const DAYS_PER_PLAN_YEAR: f64 = 365.0;

/// 计划口径的闰年判断
pub fn is_plan_leap_year(year: i32) -> bool {
    year % 4 == 0
}

/// 计划口径的当月天数
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_plan_leap_year(year) => 29,
        _ => 28,
    }
}

/// 月份所在季度
pub fn quarter_of(month: u32) -> u8 {
    ((month - 1) / 3 + 1) as u8
}

// ==========================================
// AnnualTargetGenerator - 年度计划目标生成器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnualTargetGenerator;

impl AnnualTargetGenerator {
    pub fn new() -> Self {
        Self
    }

    /// 年度总目标
    pub fn annual_target(&self, pair: &FacilityProductPair) -> f64 {
        pair.adjusted_daily_capacity() * DAYS_PER_PLAN_YEAR * TARGET_MULTIPLIER
    }

    /// 生成 12 个月度目标
    pub fn generate(
        &self,
        pair: &FacilityProductPair,
        year: i32,
    ) -> GeneratorResult<Vec<ProductionTarget>> {
        let target_set_date =
            NaiveDate::from_ymd_opt(year - 1, 12, 1).ok_or(GeneratorError::InvalidPlanYear(year))?;
        let daily_target = self.annual_target(pair) / DAYS_PER_PLAN_YEAR;

        Ok((1..=12u32)
            .map(|month| ProductionTarget {
                facility_id: pair.facility_id,
                product_id: pair.product_id,
                plan_year: year,
                quarter: quarter_of(month),
                month: Some(month),
                target_quantity: round2(daily_target * days_in_month(year, month) as f64),
                target_set_date,
                notes: format!("5-Year Plan Target for {}", year),
            })
            .collect())
    }
}
