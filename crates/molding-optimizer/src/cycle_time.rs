//! 成型週期時間模型

use molding_core::{EngineConfig, Machine, Material};
use serde::{Deserialize, Serialize};

/// 週期時間分解（秒）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleTimeBreakdown {
    pub open_close_s: f64,
    pub eject_s: f64,
    pub handling_s: f64,
    pub fill_s: f64,
    pub pack_s: f64,
    pub cool_s: f64,
}

impl CycleTimeBreakdown {
    /// 機台動作時間 = 開關模 + 頂出 + 取件
    pub fn machine_s(&self) -> f64 {
        self.open_close_s + self.eject_s + self.handling_s
    }

    /// 總週期時間；取件時間只計一次
    pub fn total_s(&self) -> f64 {
        self.open_close_s + self.fill_s + self.pack_s + self.cool_s + self.eject_s + self.handling_s
    }

    /// 每小時產出（良品）
    ///
    /// PPH = (3600 / CT) × 穴數 × (1 − 不良率)；週期為 0 時回傳 0
    pub fn parts_per_hour(&self, cavities: u32, scrap_rate: f64) -> f64 {
        let total = self.total_s();
        if total <= 0.0 {
            return 0.0;
        }
        (3600.0 / total) * f64::from(cavities) * (1.0 - scrap_rate)
    }
}

/// 週期時間計算器
pub struct CycleTimeCalculator;

impl CycleTimeCalculator {
    /// 計算指定機台/原料/肉厚/射出量的週期時間
    ///
    /// - 充填：t_fill = 基準充填時間 × (射出量 / 50 g)^0.25
    /// - 保壓：t_pack = 保壓係數 × 肉厚²
    /// - 冷卻：t_cool = 冷卻係數 × 肉厚²
    pub fn calculate(
        material: &Material,
        machine: &Machine,
        wall_thickness_mm: f64,
        shot_weight_g: f64,
        use_robot: bool,
        config: &EngineConfig,
    ) -> CycleTimeBreakdown {
        let thickness_sq = wall_thickness_mm * wall_thickness_mm;
        let mass_ratio = (shot_weight_g / config.fill_reference_shot_g).max(0.0);

        CycleTimeBreakdown {
            open_close_s: machine.open_close_s,
            eject_s: machine.eject_s,
            handling_s: config.handling_time_s(use_robot),
            fill_s: material.fill_time.midpoint() * mass_ratio.powf(config.fill_exponent),
            pack_s: material.packing_coefficient.midpoint() * thickness_sq,
            cool_s: material.cooling_coefficient.midpoint() * thickness_sq,
        }
    }
}
