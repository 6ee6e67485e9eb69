// ==========================================
// 重工业生产数据生成器 - 离散加权分布
// ==========================================
// 用途: 质量等级抽样、绩效画像分配
// 随机源由调用方注入（可设种子）
// ==========================================

use crate::engine::error::{GeneratorError, GeneratorResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// 类别 → 权重 的离散分布
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    items: Vec<T>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> WeightedChoice<T> {
    /// 由 (类别, 权重) 列表构造
    ///
    /// 权重不要求归一化；空列表、负权重、全零权重返回错误
    pub fn new(entries: &[(T, f64)]) -> GeneratorResult<Self> {
        let items: Vec<T> = entries.iter().map(|(item, _)| *item).collect();
        let weights: Vec<f64> = entries.iter().map(|(_, w)| *w).collect();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| GeneratorError::InvalidDistribution(e.to_string()))?;

        Ok(Self {
            items,
            weights,
            index,
        })
    }

    /// 抽取一个类别
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.items[self.index.sample(rng)]
    }

    /// 类别的归一化概率
    pub fn probabilities(&self) -> Vec<(T, f64)> {
        let total: f64 = self.weights.iter().sum();
        self.items
            .iter()
            .zip(&self.weights)
            .map(|(item, w)| (*item, w / total))
            .collect()
    }
}
