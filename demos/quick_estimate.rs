//! 單件成本估算示例

use molding::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 射出成型單件成本估算 ===\n");

    let inputs = UserInputs::default()
        .with_dimensions(120.0, 80.0, 25.0, 2.5)
        .with_weight(65.0)
        .with_material("ABS")
        .with_runner_type(RunnerType::Cold2Plate)
        .with_annual_volume(250_000.0)
        .with_purchased_item(PurchasedItem::new("M3 insert", Decimal::new(35, 2), 0.01));

    let calculator = MoldingCalculator::default();
    let result = calculator.calculate_checked(&inputs)?;

    println!("原料: {}", result.material_code);
    println!("淨重: {:.2} g，體積: {:.0} mm³", result.net_weight_g, result.volume_mm3);
    println!("投影面積: {:.1} cm²", result.projected_area_cm2);
    println!(
        "穴數: {}，機台: {} 噸（需求 {:.1} 噸）",
        result.cavities, result.selected_machine.tonnage, result.required_tonnage
    );
    println!(
        "週期: {:.2} s（充填 {:.2} / 保壓 {:.2} / 冷卻 {:.2}）",
        result.cycle_time_s(),
        result.cycle.fill_s,
        result.cycle.pack_s,
        result.cycle.cool_s
    );
    println!(
        "產能: {:.1} 件/時（需求 {:.1} 件/時）",
        result.achieved_pph, result.required_pph
    );

    println!("\n成本分解:");
    for share in result.costs.distribution() {
        println!(
            "  - {:?}: {} ({:.1}%)",
            share.category,
            share.amount.round_dp(4),
            share.share * Decimal::from(100)
        );
    }
    println!("單件總成本: {}", result.costs.total_cost.round_dp(4));
    println!("年度總成本: {}", result.annual_total_cost().round_dp(2));

    for warning in &result.warnings {
        println!("[{:?}] {}", warning.severity, warning);
    }

    Ok(())
}
