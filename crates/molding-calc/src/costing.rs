//! 單件成本建構
//!
//! 物理量以 f64 計算，金額以 Decimal 計算；每個成本項目先四捨五入至
//! [`MONEY_DECIMALS`] 位再彙總，使 總成本 = 製造 + 管銷 + 利潤 + 外購 精確成立。

use molding_core::{AuxiliaryKind, Catalog, EngineConfig, Material, PurchasedItem, UserInputs};
use molding_optimizer::CavityConfiguration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 金額小數位數
pub const MONEY_DECIMALS: u32 = 6;

/// f64 轉 Decimal；超出 Decimal 範圍時飽和，並回報是否飽和
///
/// NaN 視為 0；極小值視為 0。
pub(crate) fn saturating_decimal(value: f64) -> (Decimal, bool) {
    if value.is_nan() {
        return (Decimal::ZERO, true);
    }
    if value.abs() < 1e-20 {
        return (Decimal::ZERO, false);
    }
    match Decimal::try_from(value) {
        Ok(decimal) => (decimal, false),
        Err(_) if value > 0.0 => (Decimal::MAX, true),
        Err(_) => (Decimal::MIN, true),
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_DECIMALS)
}

/// 金額運算：溢位時飽和至 Decimal 上下限並記錄
#[derive(Debug, Default)]
struct MoneyMath {
    saturated: bool,
}

impl MoneyMath {
    fn convert(&mut self, value: f64) -> Decimal {
        let (decimal, saturated) = saturating_decimal(value);
        self.saturated |= saturated;
        decimal
    }

    fn mul(&mut self, a: Decimal, b: Decimal) -> Decimal {
        a.checked_mul(b).unwrap_or_else(|| {
            self.saturated = true;
            a.saturating_mul(b)
        })
    }

    fn add(&mut self, a: Decimal, b: Decimal) -> Decimal {
        a.checked_add(b).unwrap_or_else(|| {
            self.saturated = true;
            a.saturating_add(b)
        })
    }

    fn sub(&mut self, a: Decimal, b: Decimal) -> Decimal {
        a.checked_sub(b).unwrap_or_else(|| {
            self.saturated = true;
            a.saturating_sub(b)
        })
    }

    fn div(&mut self, a: Decimal, b: Decimal) -> Decimal {
        if b.is_zero() {
            return Decimal::ZERO;
        }
        a.checked_div(b).unwrap_or_else(|| {
            self.saturated = true;
            if a.is_sign_negative() == b.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
    }

    fn sum(&mut self, values: impl IntoIterator<Item = Decimal>) -> Decimal {
        values
            .into_iter()
            .fold(Decimal::ZERO, |total, value| self.add(total, value))
    }

    /// 每小時費率攤提到每件；產能為 0 時為 0
    fn per_part(&mut self, hourly: Decimal, parts_per_hour: f64) -> Decimal {
        if parts_per_hour <= 0.0 {
            return Decimal::ZERO;
        }
        let pph = self.convert(parts_per_hour);
        round_money(self.div(hourly, pph))
    }
}

/// 單一外購子件成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedItemCost {
    pub name: String,
    /// 含損耗的單件成本 = 單價 / (1 − 損耗率)
    pub cost: Decimal,
}

/// 成本分解（每件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 每件需購買的原料重量（g，含流道與不良）
    pub paid_weight_per_part_g: f64,
    /// 每件不良品重量（g）
    pub scrap_weight_per_part_g: f64,

    pub resin_cost: Decimal,
    pub scrap_credit: Decimal,
    /// 原料成本 = 樹脂 − 廢料回收
    pub material_cost: Decimal,

    pub machine_cost: Decimal,
    pub labor_cost: Decimal,
    pub auxiliary_cost: Decimal,
    /// 加工成本 = 機台 + 人工 + 周邊設備
    pub process_cost: Decimal,
    /// 實際使用的周邊設備
    pub auxiliary_equipment: Vec<AuxiliaryKind>,

    pub packaging_cost: Decimal,
    /// 製造成本 = 原料 + 加工 + 包裝
    pub manufacturing_cost: Decimal,
    pub sga_cost: Decimal,
    pub profit: Decimal,

    pub purchased_items: Vec<PurchasedItemCost>,
    pub purchased_items_cost: Decimal,

    /// 總成本 = 製造 + 管銷 + 利潤 + 外購
    pub total_cost: Decimal,

    /// 有金額超出 Decimal 範圍而飽和；此時分解恆等式不保證成立
    #[serde(default)]
    pub out_of_range: bool,
}

impl CostBreakdown {
    /// 成本結構比例；只列出金額為正的類別
    pub fn distribution(&self) -> Vec<CostShare> {
        let entries = [
            (CostCategory::Material, self.material_cost),
            (CostCategory::Process, self.process_cost),
            (
                CostCategory::Overhead,
                self.packaging_cost.saturating_add(self.sga_cost),
            ),
            (CostCategory::PurchasedItems, self.purchased_items_cost),
            (CostCategory::Margin, self.profit),
        ];

        entries
            .into_iter()
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .map(|(category, amount)| CostShare {
                category,
                amount,
                share: amount
                    .checked_div(self.total_cost)
                    .map(|share| share.round_dp(4))
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// 成本類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostCategory {
    Material,
    Process,
    /// 包裝 + 管銷
    Overhead,
    PurchasedItems,
    /// 利潤
    Margin,
}

/// 成本類別佔比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostShare {
    pub category: CostCategory,
    pub amount: Decimal,
    /// 佔總成本比例（0-1，四位小數）
    pub share: Decimal,
}

/// 成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 依最終穴數/機台配置建構單件成本
    pub fn calculate(
        inputs: &UserInputs,
        material: &Material,
        catalog: &Catalog,
        config: &EngineConfig,
        configuration: &CavityConfiguration,
        scrap_rate: f64,
    ) -> CostBreakdown {
        let cavities = f64::from(configuration.cavities.max(1));
        let yield_rate = 1.0 - scrap_rate;

        // 原料
        let paid_weight_per_part_g = if yield_rate > 0.0 {
            configuration.shot.paid_shot_weight_g / cavities / yield_rate
        } else {
            0.0
        };
        let scrap_weight_per_part_g = if yield_rate > 0.0 {
            configuration.shot.shot_weight_g / cavities * (scrap_rate / yield_rate)
        } else {
            0.0
        };

        let mut math = MoneyMath::default();

        let resin_price = inputs
            .resin_price_override
            .filter(|price| price.is_sign_positive() && !price.is_zero())
            .unwrap_or(material.resin_price);
        let paid_kg = math.convert(paid_weight_per_part_g / 1000.0);
        let resin_cost = round_money(math.mul(paid_kg, resin_price));
        let scrap_kg = math.convert(scrap_weight_per_part_g / 1000.0);
        let scrap_credit = round_money(math.mul(scrap_kg, material.scrap_price));
        let material_cost = math.sub(resin_cost, scrap_credit);

        // 加工
        let pph = configuration.achieved_pph;
        let machine_cost = math.per_part(configuration.machine.hourly_rate, pph);
        let operators = math.convert(inputs.operators);
        let overhead = math.convert(inputs.labor_overhead);
        let operator_cost = math.mul(operators, inputs.operator_rate);
        let overhead_factor = math.add(Decimal::ONE, overhead);
        let labor_hourly = math.mul(operator_cost, overhead_factor);
        let labor_cost = math.per_part(labor_hourly, pph);

        let auxiliary_equipment =
            Self::auxiliary_equipment(inputs, config, configuration.shot.shot_weight_g);
        let auxiliary_hourly = math.sum(
            auxiliary_equipment
                .iter()
                .filter_map(|kind| catalog.auxiliary(*kind))
                .map(|equipment| equipment.hourly_cost),
        );
        let auxiliary_cost = math.per_part(auxiliary_hourly, pph);
        let process_cost = math.sum([machine_cost, labor_cost, auxiliary_cost]);

        // 管銷與利潤
        let packaging_cost = round_money(inputs.packaging_cost_per_part);
        let manufacturing_cost = math.sum([material_cost, process_cost, packaging_cost]);
        let sga_cost = round_money(math.mul(manufacturing_cost, inputs.sga_rate));
        let cost_plus_sga = math.add(manufacturing_cost, sga_cost);
        let profit = round_money(math.mul(cost_plus_sga, inputs.profit_rate));

        let purchased_items: Vec<PurchasedItemCost> = inputs
            .purchased_items
            .iter()
            .map(|item| Self::purchased_item_cost(&mut math, item))
            .collect();
        let purchased_items_cost = math.sum(purchased_items.iter().map(|item| item.cost));

        let total_cost = math.sum([manufacturing_cost, sga_cost, profit, purchased_items_cost]);

        if math.saturated {
            tracing::warn!("成本計算超出金額範圍，結果已飽和");
        }

        tracing::debug!(
            "成本: 原料 {} 加工 {} 包裝 {} 管銷 {} 利潤 {} 外購 {} → 總計 {}",
            material_cost,
            process_cost,
            packaging_cost,
            sga_cost,
            profit,
            purchased_items_cost,
            total_cost
        );

        CostBreakdown {
            paid_weight_per_part_g,
            scrap_weight_per_part_g,
            resin_cost,
            scrap_credit,
            material_cost,
            machine_cost,
            labor_cost,
            auxiliary_cost,
            process_cost,
            auxiliary_equipment,
            packaging_cost,
            manufacturing_cost,
            sga_cost,
            profit,
            purchased_items,
            purchased_items_cost,
            total_cost,
            out_of_range: math.saturated,
        }
    }

    /// 周邊設備：冷卻機必用；射出量超過門檻用大型乾燥機，否則小型；
    /// 機械手與輸送帶依輸入
    pub fn auxiliary_equipment(
        inputs: &UserInputs,
        config: &EngineConfig,
        shot_weight_g: f64,
    ) -> Vec<AuxiliaryKind> {
        let mut equipment = vec![AuxiliaryKind::Chiller];

        if shot_weight_g > config.large_dryer_threshold_g {
            equipment.push(AuxiliaryKind::HopperDryerLarge);
        } else {
            equipment.push(AuxiliaryKind::HopperDryerSmall);
        }
        if inputs.use_robot {
            equipment.push(AuxiliaryKind::RobotPicker);
        }
        if inputs.use_conveyor {
            equipment.push(AuxiliaryKind::Conveyor);
        }

        equipment
    }

    fn purchased_item_cost(math: &mut MoneyMath, item: &PurchasedItem) -> PurchasedItemCost {
        let scrap_rate = math.convert(item.scrap_rate);
        let yield_rate = math.sub(Decimal::ONE, scrap_rate);
        let cost = if yield_rate > Decimal::ZERO {
            round_money(math.div(item.price, yield_rate))
        } else {
            Decimal::ZERO
        };

        PurchasedItemCost {
            name: item.name.clone(),
            cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use molding_optimizer::{CavitationOptimizer, OptimizationRequest};
    use proptest::prelude::*;

    fn configuration_for(
        catalog: &Catalog,
        config: &EngineConfig,
        inputs: &UserInputs,
        weight_g: f64,
    ) -> CavityConfiguration {
        let material = catalog.material_or_default(&inputs.material_code);
        let request = OptimizationRequest {
            material,
            projected_area_cm2: 42.5,
            clamp_factor: material.clamp_factor.midpoint(),
            part_weight_g: weight_g,
            wall_thickness_mm: inputs.wall_thickness(),
            required_pph: 30.0,
            scrap_rate: 0.02,
            runner_type: inputs.runner_type,
            use_robot: inputs.use_robot,
        };
        let optimizer = CavitationOptimizer::new(catalog, config);
        optimizer
            .optimize(&request)
            .best
            .unwrap_or_else(|| optimizer.fallback_configuration(&request))
    }

    #[test]
    fn test_decomposition_identity() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let inputs = UserInputs::default()
            .with_purchased_item(PurchasedItem::new("insert", Decimal::new(250, 2), 0.05));
        let material = catalog.material_or_default(&inputs.material_code);
        let configuration = configuration_for(&catalog, &config, &inputs, 45.0);

        let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, 0.02);

        assert_eq!(costs.material_cost, costs.resin_cost - costs.scrap_credit);
        assert_eq!(
            costs.process_cost,
            costs.machine_cost + costs.labor_cost + costs.auxiliary_cost
        );
        assert_eq!(
            costs.manufacturing_cost,
            costs.material_cost + costs.process_cost + costs.packaging_cost
        );
        assert_eq!(
            costs.total_cost,
            costs.manufacturing_cost + costs.sga_cost + costs.profit + costs.purchased_items_cost
        );
        assert!(costs.total_cost > costs.material_cost);
    }

    #[test]
    fn test_purchased_item_with_scrap() {
        let item = PurchasedItem::new("clip", Decimal::from(10), 0.1);
        let mut math = MoneyMath::default();
        let cost = CostCalculator::purchased_item_cost(&mut math, &item);

        assert_eq!(cost.cost, Decimal::new(11_111_111, 6));
        assert!(!math.saturated);
    }

    #[test]
    fn test_money_math_saturates() {
        let mut math = MoneyMath::default();

        assert_eq!(math.mul(Decimal::MAX, Decimal::from(2)), Decimal::MAX);
        assert!(math.saturated);

        let mut math = MoneyMath::default();
        assert_eq!(math.convert(1.0e32), Decimal::MAX);
        assert_eq!(math.convert(-1.0e32), Decimal::MIN);
        assert!(math.saturated);

        let mut math = MoneyMath::default();
        assert_eq!(math.convert(0.25), Decimal::new(25, 2));
        assert_eq!(math.div(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
        assert!(!math.saturated);
    }

    #[test]
    fn test_huge_weight_saturates_instead_of_panicking() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let inputs = UserInputs::default();
        let material = catalog.material_or_default(&inputs.material_code);
        let configuration = configuration_for(&catalog, &config, &inputs, 1.0e30);

        let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, 0.02);

        assert!(costs.out_of_range);
        assert!(costs.resin_cost > Decimal::ZERO);
    }

    #[test]
    fn test_distribution_skips_negative_material_cost() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        // 樹脂幾乎免費、不良率高：廢料回收大於樹脂成本
        let inputs = UserInputs {
            resin_price_override: Some(Decimal::new(1, 6)),
            ..UserInputs::default()
        };
        let material = catalog.material_or_default(&inputs.material_code);
        let configuration = configuration_for(&catalog, &config, &inputs, 45.0);
        let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, 0.5);

        assert!(costs.material_cost < Decimal::ZERO);
        let distribution = costs.distribution();
        assert!(distribution
            .iter()
            .all(|s| s.category != CostCategory::Material));
        assert!(distribution.iter().all(|s| s.amount > Decimal::ZERO));
        assert!(distribution.iter().all(|s| s.share > Decimal::ZERO));
    }

    #[test]
    fn test_resin_override_takes_precedence() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let base = UserInputs::default();
        let material = catalog.material_or_default(&base.material_code);
        let configuration = configuration_for(&catalog, &config, &base, 45.0);

        let standard = CostCalculator::calculate(&base, material, &catalog, &config, &configuration, 0.02);
        let doubled = UserInputs {
            resin_price_override: Some(material.resin_price * Decimal::from(2)),
            ..base.clone()
        };
        let overridden =
            CostCalculator::calculate(&doubled, material, &catalog, &config, &configuration, 0.02);

        assert!(overridden.resin_cost > standard.resin_cost);
        let zero_override = UserInputs {
            resin_price_override: Some(Decimal::ZERO),
            ..base
        };
        let ignored =
            CostCalculator::calculate(&zero_override, material, &catalog, &config, &configuration, 0.02);
        assert_eq!(ignored.resin_cost, standard.resin_cost);
    }

    #[test]
    fn test_auxiliary_selection() {
        let config = EngineConfig::default();
        let manual = UserInputs::default();
        assert_eq!(
            CostCalculator::auxiliary_equipment(&manual, &config, 120.0),
            vec![AuxiliaryKind::Chiller, AuxiliaryKind::HopperDryerSmall]
        );

        let automated = UserInputs {
            use_robot: true,
            use_conveyor: true,
            ..UserInputs::default()
        };
        assert_eq!(
            CostCalculator::auxiliary_equipment(&automated, &config, 501.0),
            vec![
                AuxiliaryKind::Chiller,
                AuxiliaryKind::HopperDryerLarge,
                AuxiliaryKind::RobotPicker,
                AuxiliaryKind::Conveyor,
            ]
        );
    }

    #[test]
    fn test_zero_pph_has_no_process_cost() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let inputs = UserInputs::default();
        let material = catalog.material_or_default(&inputs.material_code);
        let mut configuration = configuration_for(&catalog, &config, &inputs, 45.0);
        configuration.achieved_pph = 0.0;

        let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, 0.02);

        assert_eq!(costs.machine_cost, Decimal::ZERO);
        assert_eq!(costs.labor_cost, Decimal::ZERO);
        assert_eq!(costs.auxiliary_cost, Decimal::ZERO);
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let catalog = Catalog::standard();
        let config = EngineConfig::default();
        let inputs = UserInputs::default();
        let material = catalog.material_or_default(&inputs.material_code);
        let configuration = configuration_for(&catalog, &config, &inputs, 45.0);
        let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, 0.02);

        let distribution = costs.distribution();
        let amount: Decimal = distribution.iter().map(|s| s.amount).sum();
        let share: Decimal = distribution.iter().map(|s| s.share).sum();

        // 沒有外購子件
        assert_eq!(distribution.len(), 4);
        assert!(distribution
            .iter()
            .all(|s| s.category != CostCategory::PurchasedItems));
        assert_eq!(amount, costs.total_cost);
        assert!((share - Decimal::ONE).abs() <= Decimal::new(1, 3));
    }

    proptest! {
        #[test]
        fn prop_identity_holds_for_any_rates(
            weight in 1.0f64..400.0,
            scrap in 0.0f64..0.3,
            sga in 0u32..40,
            profit in 0u32..40,
        ) {
            let catalog = Catalog::standard();
            let config = EngineConfig::default();
            let inputs = UserInputs {
                sga_rate: Decimal::new(i64::from(sga), 2),
                profit_rate: Decimal::new(i64::from(profit), 2),
                ..UserInputs::default()
            }
            .with_purchased_item(PurchasedItem::new("nut", Decimal::new(35, 2), scrap));
            let material = catalog.material_or_default(&inputs.material_code);
            let configuration = configuration_for(&catalog, &config, &inputs, weight);

            let costs = CostCalculator::calculate(&inputs, material, &catalog, &config, &configuration, scrap);

            prop_assert_eq!(
                costs.total_cost,
                costs.manufacturing_cost + costs.sga_cost + costs.profit + costs.purchased_items_cost
            );
            prop_assert!(costs.machine_cost >= Decimal::ZERO);
            prop_assert!(costs.paid_weight_per_part_g >= weight);
        }
    }
}
