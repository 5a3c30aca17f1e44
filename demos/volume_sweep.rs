//! 年需求量敏感度分析示例

use molding::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let catalog = Catalog::standard();
    let config = EngineConfig::default().with_max_cavities(64);
    let calculator = MoldingCalculator::new(catalog, config)?;

    let inputs = UserInputs::default()
        .with_weight(18.0)
        .with_projected_area(2400.0)
        .with_material("PP_HOMO")
        .with_runner_type(RunnerType::Hot);

    let points = SensitivityAnalyzer::sweep_annual_volume(
        &calculator,
        &inputs,
        &SensitivityAnalyzer::DEFAULT_VOLUMES,
    );

    println!(
        "{:>12} {:>6} {:>8} {:>10} {:>10} {:>12}",
        "年需求", "穴數", "噸位", "週期(s)", "件/時", "單件成本"
    );
    for point in &points {
        println!(
            "{:>12} {:>6} {:>8} {:>10.2} {:>10.1} {:>12}",
            point.annual_volume,
            point.cavities,
            point.machine_tonnage,
            point.cycle_time_s,
            point.achieved_pph,
            point.total_part_cost.round_dp(4)
        );
    }

    Ok(())
}
