//! 流道與射出量計算

use molding_core::{Catalog, RunnerType};
use serde::{Deserialize, Serialize};

/// 單模射出重量（g）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotWeights {
    /// 流道重量比例 k_r
    pub runner_ratio: f64,
    /// 流道重量
    pub runner_weight_g: f64,
    /// 射出量 = 成品 × 穴數 + 流道
    pub shot_weight_g: f64,
    /// 扣除可回收料後需購買的流道重量
    pub paid_runner_weight_g: f64,
    /// 需購買的射出量
    pub paid_shot_weight_g: f64,
}

/// 流道計算器
pub struct RunnerCalculator;

impl RunnerCalculator {
    /// 流道重量比例：取「依流道類型」與「依單件重量區間」兩個中點的較小值
    pub fn runner_ratio(catalog: &Catalog, runner_type: RunnerType, part_weight_g: f64) -> f64 {
        let by_type = catalog.runner_ratio(runner_type).ratio.midpoint();
        let by_weight = catalog.weight_bracket(part_weight_g).ratio.midpoint();
        by_type.min(by_weight)
    }

    /// 計算單模射出重量
    ///
    /// 流道的可回收部分（regrind）不重複購買，因此只計入 (1 − 回收比例)。
    pub fn shot_weights(
        part_weight_g: f64,
        cavities: u32,
        runner_ratio: f64,
        regrind_fraction: f64,
    ) -> ShotWeights {
        let parts_weight = part_weight_g * f64::from(cavities);
        let runner_weight_g = runner_ratio * parts_weight;
        let paid_runner_weight_g = runner_weight_g * (1.0 - regrind_fraction);

        ShotWeights {
            runner_ratio,
            runner_weight_g,
            shot_weight_g: parts_weight + runner_weight_g,
            paid_runner_weight_g,
            paid_shot_weight_g: parts_weight + paid_runner_weight_g,
        }
    }
}
