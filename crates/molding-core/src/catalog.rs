//! 參考目錄
//!
//! 原料、機台、流道比例、周邊設備與外形係數等唯讀查詢資料。目錄以參數注入引擎，
//! 所有查詢都明確定義找不到時的預設策略。

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::{RunnerType, ShapeType};
use crate::machine::Machine;
use crate::material::{CoefficientRange, Material};
use crate::{MoldingError, Result};

/// 找不到流道類型時採用的列
pub const FALLBACK_RUNNER_TYPE: RunnerType = RunnerType::Cold2Plate;

/// 依流道類型的流道重量比例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerRatio {
    pub runner_type: RunnerType,
    pub label: String,
    pub ratio: CoefficientRange,
}

/// 依單件重量區間的流道重量比例（min_g ≤ w < max_g）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightBracket {
    pub min_g: f64,
    pub max_g: f64,
    pub ratio: CoefficientRange,
}

impl WeightBracket {
    pub fn contains(&self, weight_g: f64) -> bool {
        weight_g >= self.min_g && weight_g < self.max_g
    }
}

/// 周邊設備種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxiliaryKind {
    #[serde(rename = "hopper_small")]
    HopperDryerSmall,
    #[serde(rename = "hopper_large")]
    HopperDryerLarge,
    #[serde(rename = "chiller")]
    Chiller,
    #[serde(rename = "robot")]
    RobotPicker,
    #[serde(rename = "conveyor")]
    Conveyor,
}

/// 周邊設備每小時成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryEquipment {
    pub kind: AuxiliaryKind,
    pub name: String,
    pub power_kw: f64,
    pub hourly_cost: Decimal,
}

/// 投影面積外形係數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeFactors {
    pub rectangle: f64,
    pub round: f64,
    pub complex: f64,
}

impl ShapeFactors {
    pub fn factor(&self, shape: ShapeType) -> f64 {
        match shape {
            ShapeType::Rectangle => self.rectangle,
            ShapeType::Round => self.round,
            ShapeType::Complex => self.complex,
        }
    }
}

impl Default for ShapeFactors {
    fn default() -> Self {
        Self {
            rectangle: 0.85,
            round: 0.70,
            complex: 0.65,
        }
    }
}

/// 目錄的序列化形式（未驗證）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub materials: Vec<Material>,
    pub machines: Vec<Machine>,
    pub runner_ratios: Vec<RunnerRatio>,
    pub weight_brackets: Vec<WeightBracket>,
    pub auxiliary: Vec<AuxiliaryEquipment>,
    #[serde(default)]
    pub shape_factors: ShapeFactors,
}

/// 已驗證的參考目錄
///
/// 不變量：原料與機台皆非空，機台依噸位嚴格遞增，流道比例表皆非空。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    materials: Vec<Material>,
    machines: Vec<Machine>,
    runner_ratios: Vec<RunnerRatio>,
    weight_brackets: Vec<WeightBracket>,
    auxiliary: Vec<AuxiliaryEquipment>,
    shape_factors: ShapeFactors,
}

impl Catalog {
    /// 從原始資料建立目錄並驗證
    pub fn new(data: CatalogData) -> Result<Self> {
        validate(&data)?;
        Ok(Self::from_trusted(data))
    }

    fn from_trusted(data: CatalogData) -> Self {
        Self {
            materials: data.materials,
            machines: data.machines,
            runner_ratios: data.runner_ratios,
            weight_brackets: data.weight_brackets,
            auxiliary: data.auxiliary,
            shape_factors: data.shape_factors,
        }
    }

    /// 內建標準目錄
    pub fn standard() -> Self {
        Self::from_trusted(crate::reference_data::standard_catalog_data())
    }

    /// 從 JSON 載入目錄
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn runner_ratios(&self) -> &[RunnerRatio] {
        &self.runner_ratios
    }

    pub fn weight_brackets(&self) -> &[WeightBracket] {
        &self.weight_brackets
    }

    pub fn auxiliary_equipment(&self) -> &[AuxiliaryEquipment] {
        &self.auxiliary
    }

    pub fn shape_factors(&self) -> &ShapeFactors {
        &self.shape_factors
    }

    /// 依代碼查詢原料
    pub fn material(&self, code: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.code == code)
    }

    /// 預設原料（目錄第一筆）
    pub fn default_material(&self) -> &Material {
        &self.materials[0]
    }

    /// 依代碼查詢原料，找不到時退回預設原料
    pub fn material_or_default(&self, code: &str) -> &Material {
        self.material(code).unwrap_or_else(|| self.default_material())
    }

    /// 噸位 ≥ 需求的最小機台索引
    pub fn machine_for_tonnage(&self, required_tonnage: f64) -> Option<usize> {
        self.machines
            .iter()
            .position(|m| m.tonnage >= required_tonnage)
    }

    pub fn machine(&self, index: usize) -> Option<&Machine> {
        self.machines.get(index)
    }

    /// 下一台較大的機台
    pub fn next_machine(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.machines.len()).then_some(next)
    }

    /// 目錄中最大的機台
    pub fn largest_machine(&self) -> &Machine {
        &self.machines[self.machines.len() - 1]
    }

    /// 依流道類型查詢比例；找不到時退回冷流道兩板模，再退回最後一列
    pub fn runner_ratio(&self, runner_type: RunnerType) -> &RunnerRatio {
        let rows = &self.runner_ratios;
        rows.iter()
            .find(|r| r.runner_type == runner_type)
            .or_else(|| rows.iter().find(|r| r.runner_type == FALLBACK_RUNNER_TYPE))
            .unwrap_or(&rows[rows.len() - 1])
    }

    /// 依單件重量查詢區間；超出所有區間時退回最後一個區間
    pub fn weight_bracket(&self, part_weight_g: f64) -> &WeightBracket {
        self.weight_brackets
            .iter()
            .find(|b| b.contains(part_weight_g))
            .unwrap_or(&self.weight_brackets[self.weight_brackets.len() - 1])
    }

    /// 查詢周邊設備；目錄中沒有的設備不計成本
    pub fn auxiliary(&self, kind: AuxiliaryKind) -> Option<&AuxiliaryEquipment> {
        self.auxiliary.iter().find(|a| a.kind == kind)
    }

    pub fn shape_factor(&self, shape: ShapeType) -> f64 {
        self.shape_factors.factor(shape)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = MoldingError;

    fn try_from(data: CatalogData) -> Result<Self> {
        Self::new(data)
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            materials: catalog.materials,
            machines: catalog.machines,
            runner_ratios: catalog.runner_ratios,
            weight_brackets: catalog.weight_brackets,
            auxiliary: catalog.auxiliary,
            shape_factors: catalog.shape_factors,
        }
    }
}

fn validate(data: &CatalogData) -> Result<()> {
    if data.materials.is_empty() {
        return Err(MoldingError::InvalidCatalog("原料清單為空".to_string()));
    }
    let mut codes = HashSet::new();
    for material in &data.materials {
        if !codes.insert(material.code.as_str()) {
            return Err(MoldingError::InvalidCatalog(format!(
                "原料代碼重複: {}",
                material.code
            )));
        }
        if !(material.density.is_finite() && material.density > 0.0) {
            return Err(MoldingError::InvalidCatalog(format!(
                "原料 {} 密度必須為正數",
                material.code
            )));
        }
        let ranges = [
            material.clamp_factor,
            material.cooling_coefficient,
            material.packing_coefficient,
            material.fill_time,
        ];
        if ranges.iter().any(|r| !r.is_ordered()) {
            return Err(MoldingError::InvalidCatalog(format!(
                "原料 {} 係數範圍無效",
                material.code
            )));
        }
        if !(0.0..=100.0).contains(&material.regrind_percent) {
            return Err(MoldingError::InvalidCatalog(format!(
                "原料 {} 回收料比例必須介於 0 與 100 之間，實際為 {}",
                material.code, material.regrind_percent
            )));
        }
    }

    if data.machines.is_empty() {
        return Err(MoldingError::InvalidCatalog("機台清單為空".to_string()));
    }
    for machine in &data.machines {
        if !(machine.max_shot_g.is_finite() && machine.max_shot_g > 0.0) {
            return Err(MoldingError::InvalidCatalog(format!(
                "{} 噸機台最大射出量必須為正數",
                machine.tonnage
            )));
        }
    }
    // 「第一台噸位足夠的機台即最小機台」依賴此排序
    if data
        .machines
        .windows(2)
        .any(|pair| !(pair[0].tonnage < pair[1].tonnage))
    {
        return Err(MoldingError::InvalidCatalog(
            "機台必須依噸位嚴格遞增排序".to_string(),
        ));
    }

    if data.runner_ratios.is_empty() || data.weight_brackets.is_empty() {
        return Err(MoldingError::InvalidCatalog("流道比例表為空".to_string()));
    }
    let ratios_ordered = data.runner_ratios.iter().all(|r| r.ratio.is_ordered())
        && data.weight_brackets.iter().all(|b| b.ratio.is_ordered());
    if !ratios_ordered {
        return Err(MoldingError::InvalidCatalog("流道比例範圍無效".to_string()));
    }
    if let Some(bracket) = data
        .weight_brackets
        .iter()
        .find(|b| !(b.min_g.is_finite() && b.max_g.is_finite() && b.min_g < b.max_g))
    {
        return Err(MoldingError::InvalidCatalog(format!(
            "重量區間下限必須小於上限：{} - {}",
            bracket.min_g, bracket.max_g
        )));
    }

    Ok(())
}
