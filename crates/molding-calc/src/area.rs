//! 投影面積與鎖模力

use molding_core::{Catalog, EngineConfig, Material, UserInputs};
use serde::{Deserialize, Serialize};

/// 單穴投影面積與鎖模力參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClampEstimate {
    /// 單穴投影面積（mm²）
    pub projected_area_mm2: f64,
    /// 鎖模力係數 cf（ton/cm²，原料範圍中點）
    pub clamp_factor: f64,
    /// 安全係數
    pub safety_factor: f64,
}

impl ClampEstimate {
    /// 投影面積（cm²）
    pub fn projected_area_cm2(&self) -> f64 {
        self.projected_area_mm2 / 100.0
    }

    /// 指定穴數所需噸位 = Ap × cf × SF × n
    pub fn tonnage_for(&self, cavities: u32) -> f64 {
        self.projected_area_cm2() * self.clamp_factor * self.safety_factor * f64::from(cavities)
    }
}

pub struct AreaEstimator;

impl AreaEstimator {
    /// 估算單穴投影面積
    ///
    /// 有給定投影面積（> 0）時直接使用，否則以 長 × 寬 × 形狀係數 估算。
    pub fn estimate(
        inputs: &UserInputs,
        catalog: &Catalog,
        material: &Material,
        config: &EngineConfig,
    ) -> ClampEstimate {
        let projected_area_mm2 = match inputs.projected_area_mm2 {
            Some(area) if area > 0.0 => area,
            _ => inputs.length() * inputs.width() * catalog.shape_factor(inputs.shape),
        };

        ClampEstimate {
            projected_area_mm2,
            clamp_factor: material.clamp_factor.midpoint(),
            safety_factor: config.clamp_safety_factor,
        }
    }
}
