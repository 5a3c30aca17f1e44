//! 引擎配置
//!
//! 估算公式中的經驗常數。預設值即標準估算模型；替代值可由 JSON 載入。

use serde::{Deserialize, Serialize};

use crate::{MoldingError, Result};

/// 引擎經驗常數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 鎖模力安全係數
    pub clamp_safety_factor: f64,

    /// 穴數上限（搜尋 1, 2, 4 ... 不超過此值）
    pub max_cavities: u32,

    /// 機台射出量的參考密度（聚苯乙烯，g/cm³）
    pub reference_density: f64,

    /// 射出量可用比例（0.8 表示保留 20% 餘裕）
    pub shot_capacity_utilisation: f64,

    /// 使用機械手臂時的取件時間（s）
    pub robot_handling_s: f64,

    /// 人工取件時間（s）
    pub manual_handling_s: f64,

    /// 充填時間基準射出量（g）
    pub fill_reference_shot_g: f64,

    /// 充填時間質量冪次
    pub fill_exponent: f64,

    /// 大型乾燥機的射出量門檻（g，超過時使用大型）
    pub large_dryer_threshold_g: f64,

    /// 外形框估算體積時的實心比例
    pub bounding_box_solid_fraction: f64,

    /// 預設不良率
    pub default_scrap_rate: f64,

    /// 玻纖料預設不良率
    pub glass_filled_scrap_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            clamp_safety_factor: 1.2,
            max_cavities: 128,
            reference_density: 1.05,
            shot_capacity_utilisation: 0.8,
            robot_handling_s: 1.5,
            manual_handling_s: 4.0,
            fill_reference_shot_g: 50.0,
            fill_exponent: 0.25,
            large_dryer_threshold_g: 500.0,
            bounding_box_solid_fraction: 0.5,
            default_scrap_rate: 0.02,
            glass_filled_scrap_rate: 0.06,
        }
    }
}

impl EngineConfig {
    /// 從 JSON 載入並驗證（缺少的欄位採用預設值）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置鎖模力安全係數
    pub fn with_clamp_safety_factor(mut self, factor: f64) -> Self {
        self.clamp_safety_factor = factor;
        self
    }

    /// 建構器模式：設置穴數上限
    pub fn with_max_cavities(mut self, max_cavities: u32) -> Self {
        self.max_cavities = max_cavities;
        self
    }

    /// 建構器模式：設置射出量可用比例
    pub fn with_shot_capacity_utilisation(mut self, utilisation: f64) -> Self {
        self.shot_capacity_utilisation = utilisation;
        self
    }

    /// 建構器模式：設置預設不良率（一般料, 玻纖料）
    pub fn with_default_scrap_rates(mut self, standard: f64, glass_filled: f64) -> Self {
        self.default_scrap_rate = standard;
        self.glass_filled_scrap_rate = glass_filled;
        self
    }

    /// 取件時間
    pub fn handling_time_s(&self, use_robot: bool) -> f64 {
        if use_robot {
            self.robot_handling_s
        } else {
            self.manual_handling_s
        }
    }

    /// 未指定不良率時的預設值
    pub fn default_scrap_for(&self, glass_filled: bool) -> f64 {
        if glass_filled {
            self.glass_filled_scrap_rate
        } else {
            self.default_scrap_rate
        }
    }

    /// 穴數候選序列：1, 2, 4, ... 不超過上限
    pub fn cavity_candidates(&self) -> impl Iterator<Item = u32> {
        let max = self.max_cavities;
        std::iter::successors(Some(1u32), |n| n.checked_mul(2)).take_while(move |&n| n <= max)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("clamp_safety_factor", self.clamp_safety_factor),
            ("reference_density", self.reference_density),
            ("shot_capacity_utilisation", self.shot_capacity_utilisation),
            ("fill_reference_shot_g", self.fill_reference_shot_g),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MoldingError::InvalidConfig(format!(
                    "{} 必須為正數，實際為 {}",
                    field, value
                )));
            }
        }

        let non_negative = [
            ("robot_handling_s", self.robot_handling_s),
            ("manual_handling_s", self.manual_handling_s),
            ("fill_exponent", self.fill_exponent),
            ("large_dryer_threshold_g", self.large_dryer_threshold_g),
            ("bounding_box_solid_fraction", self.bounding_box_solid_fraction),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MoldingError::InvalidConfig(format!(
                    "{} 必須為非負數，實際為 {}",
                    field, value
                )));
            }
        }

        if self.max_cavities == 0 {
            return Err(MoldingError::InvalidConfig(
                "max_cavities 至少為 1".to_string(),
            ));
        }
        if self.shot_capacity_utilisation > 1.0 {
            return Err(MoldingError::InvalidConfig(
                "shot_capacity_utilisation 不可超過 1".to_string(),
            ));
        }
        for (field, value) in [
            ("default_scrap_rate", self.default_scrap_rate),
            ("glass_filled_scrap_rate", self.glass_filled_scrap_rate),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(MoldingError::InvalidConfig(format!(
                    "{} 必須介於 0 與 1 之間",
                    field
                )));
            }
        }

        Ok(())
    }
}
