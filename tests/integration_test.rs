//! 集成測試

use molding::prelude::*;
use molding::{estimate, estimate_json, SearchStop};
use rstest::rstest;

fn scenario_a() -> UserInputs {
    UserInputs {
        annual_volume: 100_000.0,
        working_days: 250.0,
        shifts_per_day: 2.0,
        hours_per_shift: 8.0,
        oee: 0.85,
        ..UserInputs::default()
    }
    .with_dimensions(100.0, 50.0, 20.0, 2.0)
    .with_material("PP_HOMO")
}

#[test]
fn test_basic_part_estimate() {
    // 場景：100 × 50 × 20 mm，肉厚 2 mm，PP，年需求 10 萬
    let result = estimate(&scenario_a());

    println!("穴數: {}", result.cavities);
    println!("機台: {} 噸", result.selected_machine.tonnage);
    println!("週期: {:.2} s", result.cycle_time_s());
    println!("單件成本: {}", result.costs.total_cost);

    assert!(result.cycle_time_s() > 0.0);
    assert!(result.cavities >= 1);
    assert!(result.costs.total_cost > result.costs.material_cost);
    assert!(result.costs.sga_cost > Decimal::ZERO);
    assert!(result.costs.profit > Decimal::ZERO);
    assert!(result.machine_adequate);
}

#[test]
fn test_volume_from_explicit_weight() {
    let inputs = UserInputs {
        volume_mm3: None,
        ..scenario_a().with_weight(50.0)
    };
    let result = estimate(&inputs);

    assert_eq!(result.net_weight_g, 50.0);
    assert_eq!(result.volume_mm3, 50.0 / 0.9 * 1000.0);
    assert!(!result.has_warning(WarningKind::VolumeFromBoundingBox));
}

#[test]
fn test_all_geometry_missing() {
    let inputs = UserInputs {
        weight_g: None,
        volume_mm3: None,
        ..UserInputs::default().with_dimensions(0.0, 0.0, 0.0, 0.0)
    };
    let result = estimate(&inputs);

    assert_eq!(result.volume_mm3, 0.0);
    assert_eq!(result.net_weight_g, 0.0);
    assert!(result
        .warning_messages()
        .iter()
        .any(|m| m.contains("bounding box")));
    assert!(result.cycle_time_s().is_finite());
}

#[test]
fn test_zero_annual_volume_has_no_nan() {
    let result = estimate(&scenario_a().with_weight(45.0).with_annual_volume(0.0));

    assert_eq!(result.required_pph, 0.0);
    assert_eq!(result.cavities, 1);
    assert_eq!(result.search_stop, SearchStop::DemandMet);
    assert!(result.has_warning(WarningKind::ZeroProductionRequirement));
    assert!(result.cycle_time_s().is_finite());
    assert!(result.achieved_pph.is_finite());
    assert!(result.costs.machine_cost >= Decimal::ZERO);
    assert!(result.costs.labor_cost >= Decimal::ZERO);
    assert!(result.costs.auxiliary_cost >= Decimal::ZERO);
    assert_eq!(result.annual_total_cost(), Decimal::ZERO);
}

#[test]
fn test_purchased_item_included_in_total() {
    let base = scenario_a().with_weight(45.0);
    let with_item = base
        .clone()
        .with_purchased_item(PurchasedItem::new("bracket", Decimal::from(10), 0.1));

    let without = estimate(&base);
    let with = estimate(&with_item);

    let expected = Decimal::new(11_111_111, 6);
    assert_eq!(with.costs.purchased_items.len(), 1);
    assert_eq!(with.costs.purchased_items[0].cost, expected);
    assert_eq!(with.costs.purchased_items_cost, expected);
    assert_eq!(with.costs.total_cost - without.costs.total_cost, expected);
}

#[rstest]
#[case("PP_HOMO", RunnerType::Cold2Plate, 45.0)]
#[case("ABS", RunnerType::Hot, 120.0)]
#[case("PC", RunnerType::Cold3Plate, 8.0)]
#[case("PA66_GF30", RunnerType::SemiHot, 300.0)]
fn test_cost_decomposition_identity(
    #[case] material: &str,
    #[case] runner: RunnerType,
    #[case] weight: f64,
) {
    let inputs = scenario_a()
        .with_material(material)
        .with_runner_type(runner)
        .with_weight(weight)
        .with_purchased_item(PurchasedItem::new("label", Decimal::new(5, 2), 0.02));
    let costs = estimate(&inputs).costs;

    assert_eq!(costs.material_cost, costs.resin_cost - costs.scrap_credit);
    assert_eq!(
        costs.process_cost,
        costs.machine_cost + costs.labor_cost + costs.auxiliary_cost
    );
    assert_eq!(
        costs.total_cost,
        costs.manufacturing_cost + costs.sga_cost + costs.profit + costs.purchased_items_cost
    );
}

#[test]
fn test_estimate_is_idempotent() {
    let calculator = MoldingCalculator::default();
    let inputs = scenario_a().with_weight(33.0);

    assert_eq!(calculator.calculate(&inputs), calculator.calculate(&inputs));
}

#[test]
fn test_templates_estimate_cleanly() {
    let calculator = MoldingCalculator::default();

    for template in EstimateTemplate::defaults() {
        let result = calculator.calculate_checked(&template.inputs).unwrap();
        println!(
            "{}: {} 穴, {} 噸, 單件 {}",
            template.id, result.cavities, result.selected_machine.tonnage, result.costs.total_cost
        );
        assert!(result.costs.total_cost > Decimal::ZERO, "{}", template.id);
    }
}

#[test]
fn test_json_round_trip() {
    let json = r#"{
        "weight_g": 45.0,
        "material_code": "ABS",
        "runner_type": "HOT",
        "shape": "ROUND",
        "purchased_items": [{ "name": "clip", "price": "10", "scrap_rate": 0.1 }]
    }"#;

    let output = estimate_json(json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["material_code"], "ABS");
    assert_eq!(value["costs"]["purchased_items"][0]["cost"], "11.111111");
}

#[test]
fn test_json_rejects_invalid_input() {
    let err = estimate_json(r#"{ "oee": 2.0 }"#).unwrap_err();
    assert!(matches!(err, molding::MoldingError::InvalidInput { .. }));

    let err = estimate_json("not json").unwrap_err();
    assert!(matches!(err, molding::MoldingError::Serialization(_)));
}

#[test]
fn test_volume_sweep() {
    let calculator = MoldingCalculator::default();
    let inputs = scenario_a().with_weight(10.0);

    let points = SensitivityAnalyzer::sweep_annual_volume(
        &calculator,
        &inputs,
        &SensitivityAnalyzer::DEFAULT_VOLUMES,
    );

    assert_eq!(points.len(), SensitivityAnalyzer::DEFAULT_VOLUMES.len());
    assert!(points.first().unwrap().cavities <= points.last().unwrap().cavities);
}
