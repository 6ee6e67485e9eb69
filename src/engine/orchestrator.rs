// ==========================================
// 重工业生产数据生成器 - 生成编排器
// ==========================================
// 主流程:
//   目录（一次）→ 按计划年度:
//     1) 全部设施-产品对的月度目标 → 分批落库
//     2) 逐个设施-产品对: 抽取绩效画像 → 全年三班实绩 → 分批落库
//   → 汇总统计（只做展示）
// 约束: 单线程顺序执行；唯一随机源由调用方注入或按种子创建
// ==========================================

use crate::config::GeneratorConfig;
use crate::domain::types::PerformanceProfile;
use crate::engine::batch_persister::BatchPersister;
use crate::engine::distribution::WeightedChoice;
use crate::engine::error::{GeneratorError, GeneratorResult};
use crate::engine::shift_generator::ShiftRecordGenerator;
use crate::engine::target_generator::AnnualTargetGenerator;
use crate::engine::yield_model::DailyYieldModel;
use crate::repository::{BatchOutcome, CatalogSource, ProductionStatistics, ProductionStore};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

/// 绩效画像分布: 先进 1 / 一般 3 / 落后 1
const PROFILE_WEIGHTS: [(PerformanceProfile, f64); 3] = [
    (PerformanceProfile::HighPerformer, 1.0),
    (PerformanceProfile::Average, 3.0),
    (PerformanceProfile::Struggling, 1.0),
];

// ==========================================
// GenerationSummary - 生成结果汇总
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub run_id: Uuid,
    pub seed: Option<u64>,
    pub years: Vec<i32>,
    pub pair_count: usize,
    pub records: BatchOutcome,
    pub targets: BatchOutcome,
    pub statistics: ProductionStatistics,
}

impl GenerationSummary {
    /// 输出汇总统计日志
    pub fn log(&self) {
        info!(run_id = %self.run_id, years = ?self.years, pairs = self.pair_count, "生成完成");
        info!(
            inserted = self.records.inserted,
            skipped = self.records.skipped,
            "本次生产实绩写入"
        );
        info!(
            inserted = self.targets.inserted,
            skipped = self.targets.skipped,
            "本次计划目标写入"
        );
        info!(
            total_records = self.statistics.total_records,
            total_targets = self.statistics.total_targets,
            "库内总量"
        );
        if let Some((min, max)) = self.statistics.date_range {
            info!(%min, %max, "生产日期范围");
        }
        for (category, avg) in &self.statistics.category_averages {
            info!(%category, average = avg, "类别平均班产量");
        }
        if let Some(rate) = self.statistics.mean_completion_rate {
            info!(completion_rate = rate, "月度计划平均完成率 (%)");
        }
    }
}

// ==========================================
// GenerationOrchestrator - 生成编排器
// ==========================================
pub struct GenerationOrchestrator<'a, C, S>
where
    C: CatalogSource + ?Sized,
    S: ProductionStore + ?Sized,
{
    catalog_source: &'a C,
    store: &'a S,
    config: GeneratorConfig,
    model: DailyYieldModel,
    targets: AnnualTargetGenerator,
    profiles: WeightedChoice<PerformanceProfile>,
}

impl<'a, C, S> GenerationOrchestrator<'a, C, S>
where
    C: CatalogSource + ?Sized,
    S: ProductionStore + ?Sized,
{
    /// 创建编排器
    ///
    /// # 参数
    /// - catalog_source: 设施/产品目录来源
    /// - store: 生产数据仓储
    /// - config: 生成参数（计划期、批大小、种子）
    pub fn new(
        catalog_source: &'a C,
        store: &'a S,
        config: GeneratorConfig,
    ) -> GeneratorResult<Self> {
        Ok(Self {
            catalog_source,
            store,
            model: DailyYieldModel::new(config.plan_start, config.plan_end)?,
            targets: AnnualTargetGenerator::new(),
            profiles: WeightedChoice::new(&PROFILE_WEIGHTS)?,
            config,
        })
    }

    /// 按配置种子运行；未配置种子时随机取种并记录，便于复现
    pub fn run(&self, years: &[i32]) -> GeneratorResult<GenerationSummary> {
        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());
        info!(seed, "随机种子");

        let mut rng = StdRng::seed_from_u64(seed);
        let mut summary = self.run_with_rng(years, &mut rng)?;
        summary.seed = Some(seed);
        Ok(summary)
    }

    /// 使用调用方提供的随机源运行
    #[instrument(skip(self, rng))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        years: &[i32],
        rng: &mut R,
    ) -> GeneratorResult<GenerationSummary> {
        let run_id = Uuid::new_v4();
        info!(%run_id, ?years, "开始生成重工业生产数据");

        for &year in years {
            validate_year(year)?;
        }

        let catalog = self.catalog_source.load_catalog()?;
        let persister = BatchPersister::with_batch_sizes(
            self.store,
            self.config.record_batch_size,
            self.config.target_batch_size,
        );
        let shifts = ShiftRecordGenerator::new(&self.model);

        let mut records_outcome = BatchOutcome::default();
        let mut targets_outcome = BatchOutcome::default();

        for &year in years {
            info!(year, "生成年度数据");

            // 1) 计划目标
            let mut year_targets = Vec::with_capacity(catalog.len() * 12);
            for pair in catalog.pairs() {
                year_targets.extend(self.targets.generate(pair, year)?);
            }
            targets_outcome.merge(persister.persist_targets(&year_targets)?);

            // 2) 班次实绩
            let (start, end) = year_range(year)?;
            for (idx, pair) in catalog.pairs().iter().enumerate() {
                let profile = self.profiles.sample(rng);
                info!(
                    progress = %format!("{}/{}", idx + 1, catalog.len()),
                    facility = %pair.facility_name,
                    product = %pair.product_name,
                    %profile,
                    "生成班次实绩"
                );

                let records = shifts.generate(pair, start, end, profile, rng);
                records_outcome.merge(persister.persist_records(&records)?);
            }
        }

        let statistics = self.store.statistics()?;

        let summary = GenerationSummary {
            run_id,
            seed: None,
            years: years.to_vec(),
            pair_count: catalog.len(),
            records: records_outcome,
            targets: targets_outcome,
            statistics,
        };
        summary.log();
        Ok(summary)
    }
}

fn validate_year(year: i32) -> GeneratorResult<()> {
    // 目标下达日期需要 year - 1 的 12 月 1 日
    if year <= 1 || NaiveDate::from_ymd_opt(year, 12, 31).is_none() {
        return Err(GeneratorError::InvalidPlanYear(year));
    }
    Ok(())
}

fn year_range(year: i32) -> GeneratorResult<(NaiveDate, NaiveDate)> {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(GeneratorError::InvalidPlanYear(year)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Facility, Product};
    use crate::domain::types::{FacilityType, ProductCategory};
    use crate::repository::{InMemoryProductionStore, StaticCatalogSource};

    fn source() -> StaticCatalogSource {
        StaticCatalogSource::new(
            vec![
                Facility {
                    facility_id: 1,
                    facility_name: "Magnitogorsk".to_string(),
                    facility_type: FacilityType::SteelMill,
                    capacity_per_day: 1000.0,
                    workforce_size: 3000,
                },
                Facility {
                    facility_id: 2,
                    facility_name: "Uralvagonzavod".to_string(),
                    facility_type: FacilityType::TankPlant,
                    capacity_per_day: 3.0,
                    workforce_size: 900,
                },
            ],
            vec![
                Product {
                    product_id: 10,
                    product_name: "Steel Plate".to_string(),
                    product_category: ProductCategory::Steel,
                },
                Product {
                    product_id: 20,
                    product_name: "T-72".to_string(),
                    product_category: ProductCategory::Armaments,
                },
                Product {
                    product_id: 30,
                    product_name: "Lathe".to_string(),
                    product_category: ProductCategory::Machinery,
                },
            ],
        )
    }

    #[test]
    fn test_profile_distribution_skewed_to_average() {
        let profiles = WeightedChoice::new(&PROFILE_WEIGHTS).unwrap();
        let probs = profiles.probabilities();
        assert_eq!(probs[1], (PerformanceProfile::Average, 0.6));
        assert!((probs[0].1 - 0.2).abs() < 1e-12);
        assert!((probs[2].1 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_single_year_run_counts() {
        let source = source();
        let catalog = source.load_catalog().unwrap();
        let store = InMemoryProductionStore::with_catalog(&catalog);
        let orchestrator =
            GenerationOrchestrator::new(&source, &store, GeneratorConfig::default().with_seed(1))
                .unwrap();

        let summary = orchestrator.run(&[1986]).unwrap();

        assert_eq!(summary.pair_count, 2);
        assert_eq!(summary.seed, Some(1));
        assert_eq!(summary.targets.inserted, 2 * 12);
        assert_eq!(summary.records.inserted, 2 * 365 * 3);
        assert_eq!(summary.statistics.total_records, 2 * 365 * 3);
        assert_eq!(
            summary.statistics.date_range,
            Some((
                NaiveDate::from_ymd_opt(1986, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(1986, 12, 31).unwrap()
            ))
        );
        assert!(summary.statistics.category_averages.contains_key(&ProductCategory::Steel));
        assert!(summary.statistics.mean_completion_rate.is_some());

        // 每条实绩都属于目录内的设施-产品对
        for r in store.records().unwrap() {
            assert!(catalog.contains(r.facility_id, r.product_id));
        }
    }

    #[test]
    fn test_rerun_inserts_nothing() {
        let source = source();
        let store = InMemoryProductionStore::new();
        let orchestrator =
            GenerationOrchestrator::new(&source, &store, GeneratorConfig::default()).unwrap();

        orchestrator.run(&[1987]).unwrap();
        let second = orchestrator.run(&[1987]).unwrap();

        assert_eq!(second.records.inserted, 0);
        assert_eq!(second.targets.inserted, 0);
        assert_eq!(second.records.skipped, 2 * 365 * 3);
        assert_eq!(second.targets.skipped, 2 * 12);
    }

    #[test]
    fn test_same_seed_reproduces_store_contents() {
        let source = source();
        let a = InMemoryProductionStore::new();
        let b = InMemoryProductionStore::new();
        let config = GeneratorConfig::default().with_seed(2024);

        GenerationOrchestrator::new(&source, &a, config.clone())
            .unwrap()
            .run(&[1988])
            .unwrap();
        GenerationOrchestrator::new(&source, &b, config)
            .unwrap()
            .run(&[1988])
            .unwrap();

        assert_eq!(a.records().unwrap(), b.records().unwrap());
        assert_eq!(a.targets().unwrap(), b.targets().unwrap());
    }

    #[test]
    fn test_invalid_year_rejected_before_writes() {
        let source = source();
        let store = InMemoryProductionStore::new();
        let orchestrator =
            GenerationOrchestrator::new(&source, &store, GeneratorConfig::default()).unwrap();

        let err = orchestrator.run(&[1986, 0]).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidPlanYear(0)));
        assert!(store.records().unwrap().is_empty());
    }
}
