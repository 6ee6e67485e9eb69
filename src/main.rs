// ==========================================
// 重工业生产数据生成器 - 命令行入口
// ==========================================
// 用法: heavy-industry-datagen [YEAR ...]
// - 不带参数时只生成 1986 年（试运行）
// - 数据库路径: HEAVY_INDUSTRY_DB_PATH，默认用户数据目录
// - 随机种子: HEAVY_INDUSTRY_SEED 或 config_kv generator/seed
// ==========================================

use anyhow::{bail, Context};
use heavy_industry_datagen::config::{default_db_path, ConfigManager, DEFAULT_DRY_RUN_YEAR};
use heavy_industry_datagen::db::{
    apply_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION,
};
use heavy_industry_datagen::engine::GenerationOrchestrator;
use heavy_industry_datagen::repository::{CatalogRepository, SqliteProductionStore};
use heavy_industry_datagen::{logging, APP_NAME, VERSION};
use std::sync::{Arc, Mutex};

fn parse_years(args: impl Iterator<Item = String>) -> anyhow::Result<Vec<i32>> {
    let mut years = Vec::new();
    for arg in args {
        let year = arg
            .trim()
            .parse::<i32>()
            .with_context(|| format!("无效的计划年度: {}", arg))?;
        years.push(year);
    }
    if years.is_empty() {
        years.push(DEFAULT_DRY_RUN_YEAR);
    }
    Ok(years)
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let years = parse_years(std::env::args().skip(1))?;

    let db_path = default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法连接数据库: {}", db_path))?;
    apply_schema(&conn).context("建库脚本执行失败")?;

    match read_schema_version(&conn)? {
        Some(v) if v == CURRENT_SCHEMA_VERSION => {}
        other => tracing::warn!(
            found = ?other,
            expected = CURRENT_SCHEMA_VERSION,
            "schema_version 不一致"
        ),
    }

    // 单一长连接，目录与写入共用
    let conn = Arc::new(Mutex::new(conn));

    let config = ConfigManager::from_connection(conn.clone())
        .load_generator_config()?
        .with_env_overrides()?;

    let catalog = CatalogRepository::from_connection(conn.clone());
    let store = SqliteProductionStore::from_connection(conn);

    let orchestrator = GenerationOrchestrator::new(&catalog, &store, config)?;
    let summary = orchestrator.run(&years)?;

    if summary.pair_count == 0 {
        bail!("facilities/products 中没有可生成数据的设施-产品对");
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_years_defaults_to_dry_run() {
        let years = parse_years(std::iter::empty()).unwrap();
        assert_eq!(years, vec![DEFAULT_DRY_RUN_YEAR]);
    }

    #[test]
    fn test_parse_years_rejects_garbage() {
        let args = vec!["1986".to_string(), "abc".to_string()];
        assert!(parse_years(args.into_iter()).is_err());
    }
}
