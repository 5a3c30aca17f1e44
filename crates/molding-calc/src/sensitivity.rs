//! 年需求量敏感度分析

use molding_core::UserInputs;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::MoldingCalculator;
use crate::CalculationResult;

/// 單一情境的摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub annual_volume: f64,
    pub cavities: u32,
    pub machine_tonnage: f64,
    pub cycle_time_s: f64,
    pub achieved_pph: f64,
    pub total_part_cost: Decimal,
}

impl From<&CalculationResult> for SensitivityPoint {
    fn from(result: &CalculationResult) -> Self {
        Self {
            annual_volume: result.annual_volume,
            cavities: result.cavities,
            machine_tonnage: result.selected_machine.tonnage,
            cycle_time_s: result.cycle_time_s(),
            achieved_pph: result.achieved_pph,
            total_part_cost: result.costs.total_cost,
        }
    }
}

/// 敏感度分析器
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// 預設掃描的年需求量
    pub const DEFAULT_VOLUMES: [f64; 7] = [
        10_000.0, 25_000.0, 50_000.0, 100_000.0, 250_000.0, 500_000.0, 1_000_000.0,
    ];

    /// 以不同年需求量重新估算（並行），結果順序與輸入相同
    pub fn sweep_annual_volume(
        calculator: &MoldingCalculator,
        inputs: &UserInputs,
        volumes: &[f64],
    ) -> Vec<SensitivityPoint> {
        tracing::info!("敏感度分析：{} 個年需求量情境", volumes.len());

        volumes
            .par_iter()
            .map(|&annual_volume| {
                let scenario = UserInputs {
                    annual_volume,
                    ..inputs.clone()
                };
                SensitivityPoint::from(&calculator.calculate(&scenario))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_preserves_order() {
        let calculator = MoldingCalculator::default();
        let inputs = UserInputs::default().with_weight(12.0).with_projected_area(1500.0);

        let points =
            SensitivityAnalyzer::sweep_annual_volume(&calculator, &inputs, &SensitivityAnalyzer::DEFAULT_VOLUMES);

        assert_eq!(points.len(), 7);
        for (point, volume) in points.iter().zip(SensitivityAnalyzer::DEFAULT_VOLUMES) {
            assert_eq!(point.annual_volume, volume);
        }
    }

    #[test]
    fn test_cavities_never_decrease_with_volume() {
        let calculator = MoldingCalculator::default();
        let inputs = UserInputs::default().with_weight(6.0).with_projected_area(800.0);

        let points = SensitivityAnalyzer::sweep_annual_volume(
            &calculator,
            &inputs,
            &[10_000.0, 1_000_000.0, 10_000_000.0],
        );

        assert!(points.windows(2).all(|w| w[0].cavities <= w[1].cavities));
        assert!(points[2].cavities > points[0].cavities);
    }

    #[test]
    fn test_matches_single_estimate() {
        let calculator = MoldingCalculator::default();
        let inputs = UserInputs::default().with_weight(30.0);

        let points = SensitivityAnalyzer::sweep_annual_volume(&calculator, &inputs, &[inputs.annual_volume]);
        let single = calculator.calculate(&inputs);

        assert_eq!(points[0], SensitivityPoint::from(&single));
    }

    #[test]
    fn test_empty_sweep() {
        let calculator = MoldingCalculator::default();
        let points = SensitivityAnalyzer::sweep_annual_volume(&calculator, &UserInputs::default(), &[]);
        assert!(points.is_empty());
    }
}
