//! 內建範本估算報表

use molding::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let calculator = MoldingCalculator::default();

    println!(
        "{:<26} {:>10} {:>6} {:>8} {:>8} {:>12}",
        "範本", "年需求", "穴數", "噸位", "週期(s)", "單件成本"
    );

    for template in EstimateTemplate::defaults() {
        let result = calculator.calculate_checked(&template.inputs)?;
        println!(
            "{:<26} {:>10} {:>6} {:>8} {:>8.2} {:>12}",
            template.name,
            template.inputs.annual_volume,
            result.cavities,
            result.selected_machine.tonnage,
            result.cycle_time_s(),
            result.costs.total_cost.round_dp(4)
        );
        for message in result.warning_messages() {
            println!("    ! {}", message);
        }
    }

    // 完整結果以 JSON 輸出
    if let Some(template) = EstimateTemplate::find("tmpl_auto_exterior") {
        let result = calculator.calculate(&template.inputs);
        println!("\n{}", serde_json::to_string_pretty(&result.costs)?);
    }

    Ok(())
}
