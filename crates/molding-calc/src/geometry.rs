//! 單件重量與體積解析

use molding_core::{EngineConfig, UserInputs};
use serde::{Deserialize, Serialize};

/// 重量/體積的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometrySource {
    /// 由給定重量推算體積
    Weight,
    /// 由給定體積推算重量
    Volume,
    /// 由外框尺寸估計體積
    BoundingBox,
}

/// 解析後的單件幾何
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub weight_g: f64,
    pub volume_mm3: f64,
    pub source: GeometrySource,
}

/// 幾何解析器
pub struct GeometryResolver;

impl GeometryResolver {
    /// 解析單件重量與體積
    ///
    /// - 有重量：體積 = 重量 / 密度 × 1000（重量優先，忽略給定體積）
    /// - 只有體積：重量 = 體積 / 1000 × 密度
    /// - 都沒有：體積 = 長 × 寬 × 高 × 實心比例
    ///
    /// 0 或負值視為未提供。
    pub fn resolve(inputs: &UserInputs, density: f64, config: &EngineConfig) -> ResolvedGeometry {
        let weight = inputs.weight_g.filter(|w| *w > 0.0);
        let volume = inputs.volume_mm3.filter(|v| *v > 0.0);

        match (weight, volume) {
            (Some(weight_g), _) => ResolvedGeometry {
                weight_g,
                volume_mm3: if density > 0.0 {
                    weight_g / density * 1000.0
                } else {
                    0.0
                },
                source: GeometrySource::Weight,
            },
            (None, Some(volume_mm3)) => ResolvedGeometry {
                weight_g: volume_mm3 / 1000.0 * density,
                volume_mm3,
                source: GeometrySource::Volume,
            },
            (None, None) => {
                let volume_mm3 = inputs.length()
                    * inputs.width()
                    * inputs.height()
                    * config.bounding_box_solid_fraction;
                ResolvedGeometry {
                    weight_g: volume_mm3 / 1000.0 * density,
                    volume_mm3,
                    source: GeometrySource::BoundingBox,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_inputs() -> UserInputs {
        UserInputs {
            weight_g: None,
            volume_mm3: None,
            ..UserInputs::default()
        }
    }

    #[test]
    fn test_volume_from_weight() {
        let inputs = blank_inputs().with_weight(50.0);
        let geometry = GeometryResolver::resolve(&inputs, 0.9, &EngineConfig::default());

        assert_eq!(geometry.source, GeometrySource::Weight);
        assert_eq!(geometry.weight_g, 50.0);
        assert!((geometry.volume_mm3 - 50.0 / 0.9 * 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_takes_priority_over_volume() {
        let inputs = blank_inputs().with_weight(12.0).with_volume(99_999.0);
        let geometry = GeometryResolver::resolve(&inputs, 1.2, &EngineConfig::default());

        assert_eq!(geometry.source, GeometrySource::Weight);
        assert!((geometry.volume_mm3 - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_from_volume() {
        let inputs = blank_inputs().with_volume(20_000.0);
        let geometry = GeometryResolver::resolve(&inputs, 1.05, &EngineConfig::default());

        assert_eq!(geometry.source, GeometrySource::Volume);
        assert!((geometry.weight_g - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_estimate() {
        let inputs = blank_inputs().with_dimensions(100.0, 50.0, 20.0, 2.0);
        let geometry = GeometryResolver::resolve(&inputs, 1.0, &EngineConfig::default());

        assert_eq!(geometry.source, GeometrySource::BoundingBox);
        assert!((geometry.volume_mm3 - 50_000.0).abs() < 1e-9);
        assert!((geometry.weight_g - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_dimensions_give_zero() {
        let inputs = UserInputs {
            length_mm: None,
            width_mm: None,
            height_mm: None,
            ..blank_inputs()
        };
        let geometry = GeometryResolver::resolve(&inputs, 0.9, &EngineConfig::default());

        assert_eq!(geometry.source, GeometrySource::BoundingBox);
        assert_eq!(geometry.volume_mm3, 0.0);
        assert_eq!(geometry.weight_g, 0.0);
    }
}
