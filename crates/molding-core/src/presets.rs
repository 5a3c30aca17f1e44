//! 預設值與估算範本

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::{RunnerType, UserInputs};

/// 自動化程度（對應典型 OEE）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationLevel {
    FullyAutomated,
    SemiAutomated,
    Manual,
}

impl AutomationLevel {
    pub fn oee(&self) -> f64 {
        match self {
            AutomationLevel::FullyAutomated => 0.85,
            AutomationLevel::SemiAutomated => 0.75,
            AutomationLevel::Manual => 0.65,
        }
    }
}

/// 生產情境（對應典型不良率）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrapCondition {
    /// 量產穩定
    MatureProduction,
    /// 新模具
    NewTool,
    /// 玻纖料
    GlassFilled,
    /// 外觀件
    CosmeticPart,
}

impl ScrapCondition {
    /// 不良率（0-1）
    pub fn scrap_rate(&self) -> f64 {
        match self {
            ScrapCondition::MatureProduction => 0.02,
            ScrapCondition::NewTool => 0.04,
            ScrapCondition::GlassFilled => 0.06,
            ScrapCondition::CosmeticPart => 0.05,
        }
    }
}

/// 範本的量產規模
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeProfile {
    Low,
    Medium,
    High,
}

/// 估算範本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub volume_profile: VolumeProfile,
    pub inputs: UserInputs,
}

impl EstimateTemplate {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        volume_profile: VolumeProfile,
        inputs: UserInputs,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            volume_profile,
            inputs,
        }
    }

    /// 內建範本
    pub fn defaults() -> Vec<EstimateTemplate> {
        let base = UserInputs::default();

        vec![
            Self::new(
                "tmpl_precision_single",
                "Precision Single Cavity",
                "Engineering parts with tight tolerances and complex geometries.",
                VolumeProfile::Low,
                UserInputs {
                    annual_volume: 10_000.0,
                    material_code: "PC".to_string(),
                    resin_price_override: Some(Decimal::from(320)),
                    oee: 0.70,
                    ..base.clone()
                },
            ),
            Self::new(
                "tmpl_high_volume_multi",
                "High Volume Multi-Cavity",
                "Fast cycles using hot runners and multi-cavity tooling for consumer goods.",
                VolumeProfile::High,
                UserInputs {
                    annual_volume: 2_000_000.0,
                    runner_type: RunnerType::Hot,
                    use_robot: true,
                    use_conveyor: true,
                    oee: 0.90,
                    operators: 0.5,
                    ..base.clone()
                },
            ),
            Self::new(
                "tmpl_auto_exterior",
                "Automotive Exterior (ABS)",
                "Automotive housings, grills and mirror caps.",
                VolumeProfile::Medium,
                UserInputs {
                    material_code: "ABS".to_string(),
                    annual_volume: 150_000.0,
                    scrap_rate: Some(ScrapCondition::NewTool.scrap_rate()),
                    packaging_cost_per_part: Decimal::new(120, 2),
                    ..base.clone()
                },
            ),
            Self::new(
                "tmpl_fast_consumer",
                "Disposable Goods (PP)",
                "Thin-walled, low-cost commodity items.",
                VolumeProfile::High,
                UserInputs {
                    material_code: "PP_HOMO".to_string(),
                    annual_volume: 5_000_000.0,
                    wall_thickness_mm: Some(0.8),
                    oee: 0.95,
                    profit_rate: Decimal::new(8, 2),
                    ..base
                },
            ),
        ]
    }

    /// 依 ID 查詢內建範本
    pub fn find(id: &str) -> Option<EstimateTemplate> {
        Self::defaults().into_iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automation_oee() {
        assert_eq!(AutomationLevel::FullyAutomated.oee(), 0.85);
        assert_eq!(AutomationLevel::Manual.oee(), 0.65);
    }

    #[test]
    fn test_scrap_conditions() {
        assert_eq!(ScrapCondition::MatureProduction.scrap_rate(), 0.02);
        assert_eq!(ScrapCondition::GlassFilled.scrap_rate(), 0.06);
    }

    #[test]
    fn test_default_templates_are_valid() {
        let templates = EstimateTemplate::defaults();
        assert_eq!(templates.len(), 4);
        for template in &templates {
            assert!(template.inputs.validate().is_ok(), "{}", template.id);
        }
    }

    #[test]
    fn test_find_template() {
        let template = EstimateTemplate::find("tmpl_high_volume_multi").unwrap();
        assert_eq!(template.inputs.runner_type, RunnerType::Hot);
        assert!(template.inputs.use_robot);
        assert!(EstimateTemplate::find("missing").is_none());
    }
}
