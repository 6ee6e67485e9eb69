// ==========================================
// 重工业生产数据生成器 - 设施/产品目录仓储
// ==========================================
// 红线: Repository 不含业务逻辑（兼容规则在 FacilityProductCatalog）
// 容错: capacity/workforce 为 NULL → 0；未知类型的行跳过并告警
// ==========================================

use crate::domain::catalog::{Facility, FacilityProductCatalog, Product};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

// ==========================================
// CatalogSource Trait
// ==========================================
// 目录数据来源（数据库 / 内存）
pub trait CatalogSource {
    fn load_facilities(&self) -> RepositoryResult<Vec<Facility>>;

    fn load_products(&self) -> RepositoryResult<Vec<Product>>;

    /// 加载并解析可生成的设施-产品对
    fn load_catalog(&self) -> RepositoryResult<FacilityProductCatalog> {
        let facilities = self.load_facilities()?;
        let products = self.load_products()?;
        let catalog = FacilityProductCatalog::resolve(&facilities, &products);

        info!(
            facilities = facilities.len(),
            products = products.len(),
            pairs = catalog.len(),
            "设施-产品目录加载完成"
        );
        Ok(catalog)
    }
}

// ==========================================
// CatalogRepository - SQLite 目录仓储
// ==========================================
pub struct CatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CatalogRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl CatalogSource for CatalogRepository {
    fn load_facilities(&self) -> RepositoryResult<Vec<Facility>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT facility_id, facility_name, facility_type, capacity_per_day, workforce_size
            FROM facilities
            ORDER BY facility_id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<i64>>(4)?,
            ))
        })?;

        let mut facilities = Vec::new();
        for row in rows {
            let (facility_id, facility_name, facility_type, capacity, workforce) = row?;

            let facility_type = match facility_type.parse() {
                Ok(t) => t,
                Err(e) => {
                    warn!(facility_id, error = %e, "跳过未知类型的设施");
                    continue;
                }
            };

            let capacity_per_day = match capacity {
                Some(c) if c.is_finite() && c > 0.0 => c,
                other => {
                    warn!(
                        facility_id,
                        capacity = ?other,
                        "设施日产能缺失或无效，按 0 处理"
                    );
                    0.0
                }
            };

            facilities.push(Facility {
                facility_id,
                facility_name,
                facility_type,
                capacity_per_day,
                workforce_size: workforce.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
            });
        }

        Ok(facilities)
    }

    fn load_products(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT product_id, product_name, product_category
            FROM products
            ORDER BY product_id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut products = Vec::new();
        for row in rows {
            let (product_id, product_name, category) = row?;
            match category.parse() {
                Ok(product_category) => products.push(Product {
                    product_id,
                    product_name,
                    product_category,
                }),
                Err(e) => warn!(product_id, error = %e, "跳过未知类别的产品"),
            }
        }

        Ok(products)
    }
}

// ==========================================
// StaticCatalogSource - 内存目录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    pub facilities: Vec<Facility>,
    pub products: Vec<Product>,
}

impl StaticCatalogSource {
    pub fn new(facilities: Vec<Facility>, products: Vec<Product>) -> Self {
        Self {
            facilities,
            products,
        }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load_facilities(&self) -> RepositoryResult<Vec<Facility>> {
        Ok(self.facilities.clone())
    }

    fn load_products(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.products.clone())
    }
}
