//! 射出成型機模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 射出成型機（目錄中依噸位遞增排序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// 鎖模噸位（唯一，排序鍵）
    pub tonnage: f64,

    /// 最大射出量（g，以參考密度/聚苯乙烯為基準）
    pub max_shot_g: f64,

    /// 開關模時間（s）
    pub open_close_s: f64,

    /// 頂出時間（s）
    pub eject_s: f64,

    /// 功率（kW）
    pub power_kw: f64,

    /// 機台每小時費率
    pub hourly_rate: Decimal,
}

impl Machine {
    /// 依實際原料密度校正的最大射出量
    ///
    /// capacity_material = capacity_reference × (density_material / density_reference)
    pub fn corrected_max_shot(&self, density: f64, reference_density: f64) -> f64 {
        if reference_density <= 0.0 {
            return self.max_shot_g;
        }
        self.max_shot_g * (density / reference_density)
    }

    /// 射出量是否在可用比例內
    pub fn accepts_shot(
        &self,
        shot_weight_g: f64,
        density: f64,
        reference_density: f64,
        utilisation: f64,
    ) -> bool {
        shot_weight_g <= utilisation * self.corrected_max_shot(density, reference_density)
    }
}
