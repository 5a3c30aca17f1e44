//! 內建標準參考資料

use rust_decimal::Decimal;

use crate::catalog::{
    AuxiliaryEquipment, AuxiliaryKind, CatalogData, RunnerRatio, ShapeFactors, WeightBracket,
};
use crate::inputs::RunnerType;
use crate::machine::Machine;
use crate::material::{CoefficientRange, Material};

/// 原料列：代碼, 名稱, 族群, 密度, 鎖模係數, 冷卻係數, 保壓係數, 充填時間, 回收料%, 原料價, 廢料價
type MaterialRow = (
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
    f64,
    f64,
    f64,
    f64,
    i64,
    i64,
);

const MATERIALS: [MaterialRow; 16] = [
    ("PP_HOMO", "Polypropylene Homopolymer", "PP", 0.90, 0.28, 2.1, 0.25, 0.9, 30.0, 105, 15),
    ("PP_CO", "Polypropylene Copolymer", "PP", 0.90, 0.32, 2.4, 0.30, 1.0, 30.0, 115, 15),
    ("HDPE", "High Density Polyethylene", "PE", 0.95, 0.28, 2.0, 0.25, 0.9, 25.0, 110, 15),
    ("LDPE", "Low Density Polyethylene", "PE", 0.92, 0.25, 1.9, 0.22, 0.8, 25.0, 120, 15),
    ("PS", "Polystyrene", "PS", 1.05, 0.35, 2.5, 0.30, 1.1, 20.0, 125, 15),
    ("ABS", "Acrylonitrile Butadiene Styrene", "ABS", 1.04, 0.42, 3.0, 0.38, 1.4, 20.0, 190, 25),
    ("PC", "Polycarbonate", "PC", 1.20, 0.55, 4.0, 0.50, 1.6, 10.0, 320, 40),
    ("PMMA", "Acrylic (PMMA)", "PMMA", 1.18, 0.50, 3.6, 0.45, 1.5, 10.0, 280, 35),
    ("PA6", "Nylon 6", "PA", 1.13, 0.45, 3.0, 0.40, 1.3, 20.0, 260, 30),
    ("PA66", "Nylon 66", "PA", 1.14, 0.50, 3.4, 0.45, 1.4, 20.0, 300, 35),
    ("POM", "Acetal", "POM", 1.41, 0.45, 2.6, 0.35, 1.2, 20.0, 280, 30),
    ("PBT", "Polybutylene Terephthalate", "PBT", 1.31, 0.45, 3.0, 0.40, 1.3, 20.0, 270, 30),
    ("ABS_GF30", "ABS Glass Filled 30%", "ABS_GF", 1.20, 0.55, 3.2, 0.45, 1.6, 5.0, 230, 20),
    ("PA66_GF30", "Nylon 66 Glass Filled 30%", "PA_GF", 1.36, 0.65, 3.8, 0.55, 1.8, 5.0, 360, 30),
    ("PC_GF20", "Polycarbonate Glass Filled 20%", "PC_GF", 1.32, 0.65, 4.2, 0.55, 1.9, 5.0, 390, 35),
    ("PBT_GF30", "PBT Glass Filled 30%", "PBT_GF", 1.55, 0.60, 3.6, 0.50, 1.7, 5.0, 350, 30),
];

/// 機台列：噸位, 最大射出量, 開關模, 頂出, 功率, 每小時費率
const MACHINES: [(f64, f64, f64, f64, f64, i64); 10] = [
    (80.0, 90.0, 2.0, 1.0, 10.0, 700),
    (120.0, 150.0, 2.5, 1.0, 14.0, 900),
    (150.0, 220.0, 3.0, 1.2, 18.0, 1100),
    (200.0, 350.0, 3.2, 1.3, 22.0, 1400),
    (250.0, 500.0, 3.5, 1.4, 26.0, 1700),
    (300.0, 650.0, 3.8, 1.5, 30.0, 2000),
    (350.0, 800.0, 4.2, 1.6, 35.0, 2500),
    (450.0, 1200.0, 4.8, 1.8, 45.0, 3200),
    (650.0, 2000.0, 5.5, 2.0, 60.0, 4500),
    (850.0, 3000.0, 6.5, 2.2, 80.0, 6000),
];

pub(crate) fn standard_catalog_data() -> CatalogData {
    let materials = MATERIALS
        .iter()
        .map(
            |&(code, name, family, density, clamp, cool, pack, fill, regrind, resin, scrap)| {
                Material {
                    code: code.to_string(),
                    name: name.to_string(),
                    family: family.to_string(),
                    density,
                    clamp_factor: CoefficientRange::fixed(clamp),
                    cooling_coefficient: CoefficientRange::fixed(cool),
                    packing_coefficient: CoefficientRange::fixed(pack),
                    fill_time: CoefficientRange::fixed(fill),
                    regrind_percent: regrind,
                    resin_price: Decimal::from(resin),
                    scrap_price: Decimal::from(scrap),
                }
            },
        )
        .collect();

    let machines = MACHINES
        .iter()
        .map(|&(tonnage, max_shot_g, open_close_s, eject_s, power_kw, rate)| Machine {
            tonnage,
            max_shot_g,
            open_close_s,
            eject_s,
            power_kw,
            hourly_rate: Decimal::from(rate),
        })
        .collect();

    let runner_ratios = vec![
        runner(RunnerType::Hot, "Hot Runner", 0.00, 0.02),
        runner(RunnerType::SemiHot, "Semi Hot Runner", 0.05, 0.15),
        runner(RunnerType::Cold2Plate, "Cold Runner 2-Plate", 0.15, 0.40),
        runner(RunnerType::Cold3Plate, "Cold Runner 3-Plate", 0.30, 0.80),
    ];

    let weight_brackets = vec![
        bracket(0.0, 5.0, 0.40, 0.70),
        bracket(5.0, 20.0, 0.30, 0.50),
        bracket(20.0, 50.0, 0.20, 0.40),
        bracket(50.0, 150.0, 0.15, 0.30),
        bracket(150.0, 99_999.0, 0.10, 0.25),
    ];

    let auxiliary = vec![
        auxiliary(AuxiliaryKind::HopperDryerSmall, "Hopper Dryer Small", 4.0, 80),
        auxiliary(AuxiliaryKind::HopperDryerLarge, "Hopper Dryer Large", 10.0, 160),
        auxiliary(AuxiliaryKind::Chiller, "Chiller", 10.0, 250),
        auxiliary(AuxiliaryKind::RobotPicker, "Robot Picker", 3.0, 180),
        auxiliary(AuxiliaryKind::Conveyor, "Conveyor", 2.0, 50),
    ];

    CatalogData {
        materials,
        machines,
        runner_ratios,
        weight_brackets,
        auxiliary,
        shape_factors: ShapeFactors::default(),
    }
}

fn runner(runner_type: RunnerType, label: &str, min: f64, max: f64) -> RunnerRatio {
    RunnerRatio {
        runner_type,
        label: label.to_string(),
        ratio: CoefficientRange::new(min, max),
    }
}

fn bracket(min_g: f64, max_g: f64, min: f64, max: f64) -> WeightBracket {
    WeightBracket {
        min_g,
        max_g,
        ratio: CoefficientRange::new(min, max),
    }
}

fn auxiliary(kind: AuxiliaryKind, name: &str, power_kw: f64, cost: i64) -> AuxiliaryEquipment {
    AuxiliaryEquipment {
        kind,
        name: name.to_string(),
        power_kw,
        hourly_cost: Decimal::from(cost),
    }
}
