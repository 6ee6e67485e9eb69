// ==========================================
// 重工业生产数据生成器 - 设施/产品目录领域模型
// ==========================================
// 职责: 设施、产品主数据 + 可生成数据的设施-产品对
// 红线: 只有符合兼容规则的设施-产品对才允许生成数据
// ==========================================

use crate::domain::types::{FacilityType, ProductCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// Facility - 设施主数据（只读）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub facility_id: i64,
    pub facility_name: String,
    pub facility_type: FacilityType,
    pub capacity_per_day: f64, // 日产能，缺失时按 0 处理
    pub workforce_size: u32,   // 职工人数，缺失时按 0 处理
}

// ==========================================
// Product - 产品主数据（只读）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub product_category: ProductCategory,
}

// ==========================================
// FacilityProductPair - 设施-产品对
// ==========================================
// 由目录产出，生成器只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityProductPair {
    pub facility_id: i64,
    pub facility_name: String,
    pub capacity_per_day: f64,
    pub workforce_size: u32,
    pub product_id: i64,
    pub product_name: String,
    pub product_category: ProductCategory,
}

impl FacilityProductPair {
    /// 按产品类别折算后的日产能
    pub fn adjusted_daily_capacity(&self) -> f64 {
        self.capacity_per_day * self.product_category.capacity_multiplier()
    }
}

// ==========================================
// FacilityProductCatalog - 设施产品目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FacilityProductCatalog {
    pairs: Vec<FacilityProductPair>,
    index: HashSet<(i64, i64)>,
}

impl FacilityProductCatalog {
    /// 按兼容规则做设施 × 产品的交叉匹配
    ///
    /// 输出按 (facility_id, product_id) 升序
    pub fn resolve(facilities: &[Facility], products: &[Product]) -> Self {
        let mut pairs: Vec<FacilityProductPair> = facilities
            .iter()
            .flat_map(|facility| {
                products
                    .iter()
                    .filter(|product| facility.facility_type.produces(product.product_category))
                    .map(move |product| FacilityProductPair {
                        facility_id: facility.facility_id,
                        facility_name: facility.facility_name.clone(),
                        capacity_per_day: facility.capacity_per_day,
                        workforce_size: facility.workforce_size,
                        product_id: product.product_id,
                        product_name: product.product_name.clone(),
                        product_category: product.product_category,
                    })
            })
            .collect();

        pairs.sort_by_key(|p| (p.facility_id, p.product_id));

        let index = pairs
            .iter()
            .map(|p| (p.facility_id, p.product_id))
            .collect();

        Self { pairs, index }
    }

    pub fn pairs(&self) -> &[FacilityProductPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// 判断设施-产品对是否在可生成集合内
    pub fn contains(&self, facility_id: i64, product_id: i64) -> bool {
        self.index.contains(&(facility_id, product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(id: i64, facility_type: FacilityType) -> Facility {
        Facility {
            facility_id: id,
            facility_name: format!("Facility {}", id),
            facility_type,
            capacity_per_day: 1000.0,
            workforce_size: 3000,
        }
    }

    fn product(id: i64, category: ProductCategory) -> Product {
        Product {
            product_id: id,
            product_name: format!("Product {}", id),
            product_category: category,
        }
    }

    #[test]
    fn test_resolve_applies_compatibility_rule() {
        let facilities = vec![
            facility(2, FacilityType::TankPlant),
            facility(1, FacilityType::SteelMill),
        ];
        let products = vec![
            product(10, ProductCategory::Steel),
            product(11, ProductCategory::Steel),
            product(20, ProductCategory::Armaments),
            product(30, ProductCategory::Machinery),
        ];

        let catalog = FacilityProductCatalog::resolve(&facilities, &products);

        let keys: Vec<(i64, i64)> = catalog
            .pairs()
            .iter()
            .map(|p| (p.facility_id, p.product_id))
            .collect();
        assert_eq!(keys, vec![(1, 10), (1, 11), (2, 20)]);
        assert!(catalog.contains(2, 20));
        assert!(!catalog.contains(2, 30));
    }

    #[test]
    fn test_adjusted_capacity_for_steel() {
        let catalog = FacilityProductCatalog::resolve(
            &[facility(1, FacilityType::SteelMill)],
            &[product(10, ProductCategory::Steel)],
        );
        let pair = &catalog.pairs()[0];
        assert!((pair.adjusted_daily_capacity() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = FacilityProductCatalog::resolve(&[], &[product(1, ProductCategory::Steel)]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
