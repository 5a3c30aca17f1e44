//! 成本估算主計算器

use molding_core::{Catalog, EngineConfig, UserInputs};
use molding_optimizer::{CavitationOptimizer, OptimizationRequest, SearchStop};

use crate::area::AreaEstimator;
use crate::costing::CostCalculator;
use crate::geometry::{GeometryResolver, GeometrySource};
use crate::production::ProductionTarget;
use crate::{CalculationResult, EstimateWarning, WarningKind};

/// 射出成型成本計算器
///
/// 持有參考目錄與引擎配置；計算本身是純函數，相同輸入得到相同結果。
pub struct MoldingCalculator {
    /// 參考目錄（原料、機台、流道、周邊設備）
    catalog: Catalog,

    /// 引擎配置
    config: EngineConfig,
}

impl MoldingCalculator {
    /// 創建新的計算器；配置無效時回傳錯誤
    pub fn new(catalog: Catalog, config: EngineConfig) -> molding_core::Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// 使用內建參考目錄與預設配置
    pub fn with_standard_catalog() -> Self {
        Self {
            catalog: Catalog::standard(),
            config: EngineConfig::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 先驗證輸入再計算
    pub fn calculate_checked(&self, inputs: &UserInputs) -> molding_core::Result<CalculationResult> {
        inputs.validate()?;
        Ok(self.calculate(inputs))
    }

    /// 主計算入口
    ///
    /// 不會失敗：缺少的輸入以 0 或預設值處理，異常情況以警告回報。
    pub fn calculate(&self, inputs: &UserInputs) -> CalculationResult {
        tracing::info!(
            "開始成本估算：原料 {}，年需求 {}，流道 {:?}",
            inputs.material_code,
            inputs.annual_volume,
            inputs.runner_type
        );

        let mut warnings = Vec::new();

        // Step 1: 原料查詢
        let material = match self.catalog.material(&inputs.material_code) {
            Some(material) => material,
            None => {
                let fallback = self.catalog.default_material();
                tracing::warn!(
                    "查無原料代碼 {}，改用 {}",
                    inputs.material_code,
                    fallback.code
                );
                warnings.push(EstimateWarning::warning(
                    WarningKind::MaterialNotFound,
                    format!(
                        "Material '{}' not found. Using '{}' instead.",
                        inputs.material_code, fallback.code
                    ),
                ));
                fallback
            }
        };

        // Step 2: 重量與體積
        tracing::debug!("Step 2: 幾何解析");
        let geometry = GeometryResolver::resolve(inputs, material.density, &self.config);
        if geometry.source == GeometrySource::BoundingBox {
            warnings.push(EstimateWarning::warning(
                WarningKind::VolumeFromBoundingBox,
                format!(
                    "Volume estimated from bounding box ({:.0}% solid).",
                    self.config.bounding_box_solid_fraction * 100.0
                ),
            ));
        }
        tracing::debug!(
            "淨重 {:.2} g，體積 {:.0} mm³ ({:?})",
            geometry.weight_g,
            geometry.volume_mm3,
            geometry.source
        );

        // Step 3: 投影面積與鎖模力
        tracing::debug!("Step 3: 投影面積");
        let clamp = AreaEstimator::estimate(inputs, &self.catalog, material, &self.config);

        // Step 4: 生產目標
        tracing::debug!("Step 4: 生產目標");
        let target = ProductionTarget::from_inputs(inputs);
        if !target.has_available_hours() {
            warnings.push(EstimateWarning::warning(
                WarningKind::NoAvailableHours,
                "No available production hours; check working days, shifts and OEE.",
            ));
        } else if target.required_pph <= 0.0 {
            warnings.push(EstimateWarning::warning(
                WarningKind::ZeroProductionRequirement,
                "Zero production requirements.",
            ));
        }
        tracing::debug!(
            "可用時數 {:.1} h，需求產能 {:.2} 件/時",
            target.available_hours,
            target.required_pph
        );

        // Step 5: 穴數與機台
        tracing::debug!("Step 5: 穴數與機台搜尋");
        let scrap_rate = inputs
            .scrap_rate
            .unwrap_or_else(|| self.config.default_scrap_for(inputs.glass_filled));
        let request = OptimizationRequest {
            material,
            projected_area_cm2: clamp.projected_area_cm2(),
            clamp_factor: clamp.clamp_factor,
            part_weight_g: geometry.weight_g,
            wall_thickness_mm: inputs.wall_thickness(),
            required_pph: target.required_pph,
            scrap_rate,
            runner_type: inputs.runner_type,
            use_robot: inputs.use_robot,
        };
        let optimizer = CavitationOptimizer::new(&self.catalog, &self.config);
        let outcome = optimizer.optimize(&request);

        let (configuration, machine_adequate) = match outcome.best {
            Some(configuration) => (configuration, true),
            None => {
                let fallback = optimizer.fallback_configuration(&request);
                tracing::warn!(
                    "沒有可行的機台（{:?}），需求 {:.1} 噸",
                    outcome.stop,
                    fallback.required_tonnage
                );
                let reason = match outcome.stop {
                    SearchStop::ShotCapacityExhausted => "shot capacity",
                    _ => "clamp tonnage",
                };
                warnings.push(EstimateWarning::error(
                    WarningKind::NoFeasibleMachine,
                    format!(
                        "No machine in the catalog has enough {} for a single cavity \
                         ({:.1} t required); results use the largest machine.",
                        reason, fallback.required_tonnage
                    ),
                ));
                (fallback, false)
            }
        };

        if configuration.achieved_pph < target.required_pph {
            tracing::warn!(
                "產能不足：{:.1} < {:.1} 件/時",
                configuration.achieved_pph,
                target.required_pph
            );
            warnings.push(EstimateWarning::warning(
                WarningKind::UnderCapacity,
                format!(
                    "Achieved {:.1} parts/h is below the required {:.1} parts/h.",
                    configuration.achieved_pph, target.required_pph
                ),
            ));
        }

        // Step 6: 成本
        tracing::debug!("Step 6: 成本建構");
        let costs = CostCalculator::calculate(
            inputs,
            material,
            &self.catalog,
            &self.config,
            &configuration,
            scrap_rate,
        );
        if costs.out_of_range {
            tracing::warn!("金額超出可表示範圍，單件成本 {} 已飽和", costs.total_cost);
            warnings.push(EstimateWarning::error(
                WarningKind::ValueOutOfRange,
                "Cost figures exceed the representable range and were saturated; \
                 check the input magnitudes.",
            ));
        }

        tracing::info!(
            "成本估算完成：{} 穴，{} 噸機台，週期 {:.2} s，單件成本 {}，警告 {} 筆",
            configuration.cavities,
            configuration.machine.tonnage,
            configuration.cycle.total_s(),
            costs.total_cost,
            warnings.len()
        );

        CalculationResult {
            material_code: material.code.clone(),
            net_weight_g: geometry.weight_g,
            volume_mm3: geometry.volume_mm3,
            projected_area_cm2: clamp.projected_area_cm2(),
            required_tonnage: clamp.tonnage_for(configuration.cavities),
            selected_machine: configuration.machine,
            machine_adequate,
            cavities: configuration.cavities,
            available_hours: target.available_hours,
            required_pph: target.required_pph,
            runner_weight_g: configuration.shot.runner_weight_g,
            paid_runner_weight_g: configuration.shot.paid_runner_weight_g,
            shot_weight_g: configuration.shot.shot_weight_g,
            paid_shot_weight_g: configuration.shot.paid_shot_weight_g,
            cycle: configuration.cycle,
            achieved_pph: configuration.achieved_pph,
            scrap_rate,
            annual_volume: inputs.annual_volume,
            search_stop: outcome.stop,
            costs,
            warnings,
        }
    }
}

impl Default for MoldingCalculator {
    fn default() -> Self {
        Self::with_standard_catalog()
    }
}
