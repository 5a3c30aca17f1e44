//! 穴數與機台搜尋
//!
//! 依 1, 2, 4, 8 ... 的順序嘗試穴數；每個候選配置都是獨立計算的不可變快照，
//! 第一個達到需求產能的穴數即為最佳解。

use molding_core::{Catalog, EngineConfig, Machine, Material, RunnerType};
use serde::{Deserialize, Serialize};

use crate::cycle_time::{CycleTimeBreakdown, CycleTimeCalculator};
use crate::runner::{RunnerCalculator, ShotWeights};
use crate::{OptimizationResult, SearchStop};

/// 搜尋所需的已解析輸入
#[derive(Debug, Clone, Copy)]
pub struct OptimizationRequest<'a> {
    pub material: &'a Material,
    /// 單穴投影面積（cm²）
    pub projected_area_cm2: f64,
    /// 鎖模力係數（ton/cm²）
    pub clamp_factor: f64,
    /// 單件淨重（g）
    pub part_weight_g: f64,
    pub wall_thickness_mm: f64,
    /// 需求產能（件/小時）
    pub required_pph: f64,
    /// 有效不良率（0-1）
    pub scrap_rate: f64,
    pub runner_type: RunnerType,
    pub use_robot: bool,
}

/// 一個完整評估過的穴數/機台配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CavityConfiguration {
    pub cavities: u32,
    /// 機台在目錄中的索引
    pub machine_index: usize,
    pub machine: Machine,
    /// 此穴數所需鎖模噸位
    pub required_tonnage: f64,
    pub shot: ShotWeights,
    pub cycle: CycleTimeBreakdown,
    /// 實際良品產能（件/小時）
    pub achieved_pph: f64,
}

/// 穴數與機台優化器
pub struct CavitationOptimizer<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
}

impl<'a> CavitationOptimizer<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// 指定穴數所需的鎖模噸位
    pub fn required_tonnage(&self, request: &OptimizationRequest<'_>, cavities: u32) -> f64 {
        request.projected_area_cm2
            * request.clamp_factor
            * self.config.clamp_safety_factor
            * f64::from(cavities)
    }

    /// 執行搜尋
    pub fn optimize(&self, request: &OptimizationRequest<'_>) -> OptimizationResult {
        let runner_ratio = RunnerCalculator::runner_ratio(
            self.catalog,
            request.runner_type,
            request.part_weight_g,
        );

        let mut best: Option<CavityConfiguration> = None;
        let mut stop = SearchStop::CavityLimit;

        for cavities in self.config.cavity_candidates() {
            let candidate = match self.try_cavities(request, cavities, runner_ratio) {
                Ok(candidate) => candidate,
                Err(reason) => {
                    tracing::debug!("穴數 {} 無可用機台: {:?}", cavities, reason);
                    stop = reason;
                    break;
                }
            };

            tracing::debug!(
                "穴數 {}: {} 噸機台, 射出量 {:.1} g, 週期 {:.2} s, 產能 {:.1} 件/時",
                cavities,
                candidate.machine.tonnage,
                candidate.shot.shot_weight_g,
                candidate.cycle.total_s(),
                candidate.achieved_pph
            );

            let meets_demand = candidate.achieved_pph >= request.required_pph;
            best = Some(candidate);

            if meets_demand {
                stop = SearchStop::DemandMet;
                break;
            }
        }

        OptimizationResult::new(best, stop)
    }

    /// 為單一穴數挑選機台並評估
    fn try_cavities(
        &self,
        request: &OptimizationRequest<'_>,
        cavities: u32,
        runner_ratio: f64,
    ) -> Result<CavityConfiguration, SearchStop> {
        let required_tonnage = self.required_tonnage(request, cavities);
        let tonnage_index = self
            .catalog
            .machine_for_tonnage(required_tonnage)
            .ok_or(SearchStop::TonnageExhausted)?;

        let shot = RunnerCalculator::shot_weights(
            request.part_weight_g,
            cavities,
            runner_ratio,
            request.material.regrind_fraction(),
        );

        let machine_index = self
            .escalate_for_shot(tonnage_index, shot.shot_weight_g, request.material.density)
            .ok_or(SearchStop::ShotCapacityExhausted)?;

        Ok(self.evaluate(request, cavities, machine_index, required_tonnage, shot))
    }

    /// 射出量超過可用比例時換下一台較大機台
    fn escalate_for_shot(&self, start: usize, shot_weight_g: f64, density: f64) -> Option<usize> {
        let mut index = start;
        loop {
            let machine = self.catalog.machine(index)?;
            if machine.accepts_shot(
                shot_weight_g,
                density,
                self.config.reference_density,
                self.config.shot_capacity_utilisation,
            ) {
                return Some(index);
            }
            index = self.catalog.next_machine(index)?;
        }
    }

    /// 最大機台、單穴的退回配置，不檢查噸位與射出量限制
    ///
    /// 搜尋找不到任何可行配置時由呼叫端使用，結果須標示為機台不足。
    pub fn fallback_configuration(&self, request: &OptimizationRequest<'_>) -> CavityConfiguration {
        let machine_index = self.catalog.machines().len() - 1;
        let runner_ratio = RunnerCalculator::runner_ratio(
            self.catalog,
            request.runner_type,
            request.part_weight_g,
        );
        let shot = RunnerCalculator::shot_weights(
            request.part_weight_g,
            1,
            runner_ratio,
            request.material.regrind_fraction(),
        );
        let required_tonnage = self.required_tonnage(request, 1);
        self.evaluate(request, 1, machine_index, required_tonnage, shot)
    }

    fn evaluate(
        &self,
        request: &OptimizationRequest<'_>,
        cavities: u32,
        machine_index: usize,
        required_tonnage: f64,
        shot: ShotWeights,
    ) -> CavityConfiguration {
        let machine = self.catalog.machines()[machine_index].clone();
        let cycle = CycleTimeCalculator::calculate(
            request.material,
            &machine,
            request.wall_thickness_mm,
            shot.shot_weight_g,
            request.use_robot,
            self.config,
        );
        let achieved_pph = cycle.parts_per_hour(cavities, request.scrap_rate);

        CavityConfiguration {
            cavities,
            machine_index,
            machine,
            required_tonnage,
            shot,
            cycle,
            achieved_pph,
        }
    }
}
