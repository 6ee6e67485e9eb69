// ==========================================
// 端到端生成测试（SQLite）
// ==========================================
// 测试目标: 单年生成行数、重复运行幂等、种子可复现、闰年月度目标
// ==========================================


use heavy_industry_datagen::config::GeneratorConfig;
use heavy_industry_datagen::engine::{GenerationOrchestrator, GenerationSummary, GeneratorError};
use heavy_industry_datagen::logging;
use heavy_industry_datagen::repository::{CatalogRepository, SqliteProductionStore};
use rusqlite::Connection;
use test_helpers::*;

const SEED: u64 = 19860101;

fn run_years(db_path: &str, years: &[i32], seed: u64) -> GenerationSummary {
    let conn = open_shared(db_path).unwrap();
    let catalog = CatalogRepository::from_connection(conn.clone());
    let store = SqliteProductionStore::from_connection(conn);

    GenerationOrchestrator::new(&catalog, &store, GeneratorConfig::default().with_seed(seed))
        .unwrap()
        .run(years)
        .unwrap()
}

fn seeded_db() -> (tempfile::NamedTempFile, String) {
    let (tmp, db_path) = create_test_db().unwrap();
    let conn = open_shared(&db_path).unwrap();
    seed_standard_catalog(&conn.lock().unwrap()).unwrap();
    (tmp, db_path)
}

fn all_quantities(conn: &Connection) -> Vec<(i64, i64, String, i64, f64, String)> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT facility_id, product_id, production_date, shift_number,
                   quantity_produced, quality_grade
            FROM actual_production
            ORDER BY facility_id, product_id, production_date, shift_number
            "#,
        )
        .unwrap();
    stmt.query_map([], |row| {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    })
    .unwrap()
    .collect::<Result<Vec<_>, _>>()
    .unwrap()
}

#[test]
fn test_single_year_generation_counts() {
    logging::init_test();
    let (_tmp, db_path) = seeded_db();

    let summary = run_years(&db_path, &[1986], SEED);

    // 4 个设施-产品对 × 365 天 × 3 班
    assert_eq!(summary.pair_count, 4);
    assert_eq!(summary.records.inserted, 4380);
    assert_eq!(summary.records.skipped, 0);
    assert_eq!(summary.targets.inserted, 48);
    assert_eq!(summary.seed, Some(SEED));
    assert_eq!(summary.statistics.total_records, 4380);
    assert_eq!(summary.statistics.total_targets, 48);
    assert!(summary.statistics.mean_completion_rate.is_some());

    let (first, last) = summary.statistics.date_range.unwrap();
    assert_eq!(first.to_string(), "1986-01-01");
    assert_eq!(last.to_string(), "1986-12-31");
}

#[test]
fn test_generated_rows_respect_invariants() {
    logging::init_test();
    let (_tmp, db_path) = seeded_db();
    run_years(&db_path, &[1986], SEED);

    let conn = open_shared(&db_path).unwrap();
    let guard = conn.lock().unwrap();

    let violations: i64 = guard
        .query_row(
            r#"
            SELECT COUNT(*) FROM actual_production
            WHERE quantity_produced < 0
               OR defect_count > quantity_produced
               OR equipment_downtime_hours < 0
               OR equipment_downtime_hours > 20
               OR shift_number NOT IN (1, 2, 3)
               OR quality_grade NOT IN ('A', 'B', 'C')
            "#,
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(violations, 0);

    // 只出现兼容的设施-产品对
    let pairs: Vec<(i64, i64)> = {
        let mut stmt = guard
            .prepare("SELECT DISTINCT facility_id, product_id FROM actual_production ORDER BY 1, 2")
            .unwrap();
        stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    };
    assert_eq!(pairs, vec![(1, 101), (1, 102), (2, 201), (3, 301)]);

    let note: String = guard
        .query_row(
            "SELECT notes FROM production_targets WHERE plan_year = 1986 LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(note, "5-Year Plan Target for 1986");

    let set_date: String = guard
        .query_row(
            "SELECT DISTINCT target_set_date FROM production_targets",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(set_date, "1985-12-01");
}

#[test]
fn test_rerun_inserts_nothing() {
    logging::init_test();
    let (_tmp, db_path) = seeded_db();
    run_years(&db_path, &[1986], SEED);

    // 不同种子也不会覆盖已有数据
    let second = run_years(&db_path, &[1986], SEED + 1);
    assert_eq!(second.records.inserted, 0);
    assert_eq!(second.records.skipped, 4380);
    assert_eq!(second.targets.inserted, 0);
    assert_eq!(second.targets.skipped, 48);

    let conn = open_shared(&db_path).unwrap();
    let guard = conn.lock().unwrap();
    assert_eq!(count_rows(&guard, "actual_production").unwrap(), 4380);
    assert_eq!(count_rows(&guard, "production_targets").unwrap(), 48);
}

#[test]
fn test_same_seed_reproduces_rows() {
    logging::init_test();
    let (_tmp_a, db_a) = seeded_db();
    let (_tmp_b, db_b) = seeded_db();

    run_years(&db_a, &[1986], SEED);
    run_years(&db_b, &[1986], SEED);

    let rows_a = all_quantities(&open_shared(&db_a).unwrap().lock().unwrap());
    let rows_b = all_quantities(&open_shared(&db_b).unwrap().lock().unwrap());
    assert_eq!(rows_a.len(), 4380);
    assert_eq!(rows_a, rows_b);
}

#[test]
fn test_leap_year_february_target() {
    logging::init_test();
    let (_tmp, db_path) = seeded_db();
    let summary = run_years(&db_path, &[1988], SEED);

    // 1988: 366 天
    assert_eq!(summary.records.inserted, 4 * 366 * 3);

    let conn = open_shared(&db_path).unwrap();
    let guard = conn.lock().unwrap();
    let monthly = |month: i64| -> f64 {
        guard
            .query_row(
                "SELECT target_quantity FROM production_targets
                 WHERE facility_id = 2 AND product_id = 201 AND plan_year = 1988 AND month = ?1",
                [month],
                |row| row.get(0),
            )
            .unwrap()
    };

    // 年度目标 40 × 365 × 1.10 = 16060，日均 44
    assert!((monthly(1) - 44.0 * 31.0).abs() < 0.01);
    assert!((monthly(2) - 44.0 * 29.0).abs() < 0.01);
}

#[test]
fn test_empty_catalog_generates_nothing() {
    logging::init_test();
    let (_tmp, db_path) = create_test_db().unwrap();
    let summary = run_years(&db_path, &[1986], SEED);

    assert_eq!(summary.pair_count, 0);
    assert_eq!(summary.records.total(), 0);
    assert_eq!(summary.targets.total(), 0);
}

#[test]
fn test_invalid_year_rejected_before_writes() {
    logging::init_test();
    let (_tmp, db_path) = seeded_db();
    let conn = open_shared(&db_path).unwrap();
    let catalog = CatalogRepository::from_connection(conn.clone());
    let store = SqliteProductionStore::from_connection(conn.clone());

    let config = GeneratorConfig::default().with_seed(SEED);
    let result = GenerationOrchestrator::new(&catalog, &store, config)
        .unwrap()
        .run(&[1986, 0]);
    assert!(matches!(result, Err(GeneratorError::InvalidPlanYear(0))));

    let guard = conn.lock().unwrap();
    assert_eq!(count_rows(&guard, "actual_production").unwrap(), 0);
}
