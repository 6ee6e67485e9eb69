// ==========================================
// 重工业生产数据生成器 - 生产实绩与计划目标
// ==========================================
// 对应表: actual_production / production_targets
// 红线: 写入后不可变；自然键冲突时跳过，不覆盖
// ==========================================

use crate::domain::types::QualityGrade;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 班次生产实绩
// ==========================================
// 自然键: (facility_id, product_id, production_date, shift_number)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub facility_id: i64,
    pub product_id: i64,
    pub production_date: NaiveDate,
    pub quantity_produced: f64,        // 产量 (保留两位小数)
    pub quality_grade: QualityGrade,
    pub shift_number: u8,              // 1..=3
    pub workers_on_shift: u32,
    pub equipment_downtime_hours: f64, // 停机时长 (小时)
    pub defect_count: u32,
    pub notes: String,
    pub reported_by: String,
    pub reported_at: NaiveDateTime,    // 生产日期 + 8h × 班次
}

impl ProductionRecord {
    pub fn natural_key(&self) -> (i64, i64, NaiveDate, u8) {
        (
            self.facility_id,
            self.product_id,
            self.production_date,
            self.shift_number,
        )
    }
}

// ==========================================
// ProductionTarget - 计划目标
// ==========================================
// 唯一键: (facility_id, product_id, plan_year, month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTarget {
    pub facility_id: i64,
    pub product_id: i64,
    pub plan_year: i32,
    pub quarter: u8,
    pub month: Option<u32>, // None 表示仅年度目标
    pub target_quantity: f64,
    pub target_set_date: NaiveDate,
    pub notes: String,
}

impl ProductionTarget {
    pub fn natural_key(&self) -> (i64, i64, i32, Option<u32>) {
        (self.facility_id, self.product_id, self.plan_year, self.month)
    }
}

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
