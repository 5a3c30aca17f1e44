//! 塑膠原料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 經驗係數範圍（最小值/最大值），引擎一律取中點
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRange {
    pub min: f64,
    pub max: f64,
}

impl CoefficientRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 單一值（最小值 = 最大值）
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value)
    }

    /// 範圍中點
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// 原料（不可變的參考資料，以代碼查詢）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// 原料代碼（唯一鍵）
    pub code: String,

    /// 原料名稱
    pub name: String,

    /// 原料族群（PP、PE、ABS_GF ...）
    pub family: String,

    /// 密度（g/cm³）
    pub density: f64,

    /// 鎖模力係數（ton/cm²）
    pub clamp_factor: CoefficientRange,

    /// 冷卻係數（s/mm²）
    pub cooling_coefficient: CoefficientRange,

    /// 保壓係數（s/mm²）
    pub packing_coefficient: CoefficientRange,

    /// 基準充填時間（s，50 g 射出量）
    pub fill_time: CoefficientRange,

    /// 允許回收料比例（%，例如 30 表示 30%）
    pub regrind_percent: f64,

    /// 原料價格（每公斤）
    pub resin_price: Decimal,

    /// 廢料回收價格（每公斤）
    pub scrap_price: Decimal,
}

impl Material {
    /// 允許回收料比例（0-1）
    pub fn regrind_fraction(&self) -> f64 {
        self.regrind_percent / 100.0
    }
}
