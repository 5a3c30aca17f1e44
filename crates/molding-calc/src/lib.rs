//! # Molding Calculation Engine
//!
//! 射出成型單件成本計算引擎

pub mod area;
pub mod calculator;
pub mod costing;
pub mod geometry;
pub mod production;
pub mod sensitivity;

// Re-export 主要類型
pub use area::{AreaEstimator, ClampEstimate};
pub use calculator::MoldingCalculator;
pub use costing::{CostBreakdown, CostCalculator, CostCategory, CostShare, PurchasedItemCost};
pub use geometry::{GeometryResolver, GeometrySource, ResolvedGeometry};
pub use production::ProductionTarget;
pub use sensitivity::{SensitivityAnalyzer, SensitivityPoint};

use molding_core::Machine;
use molding_optimizer::{CycleTimeBreakdown, SearchStop};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 成本估算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// 實際使用的原料代碼（查無代碼時為退回的預設原料）
    pub material_code: String,

    /// 單件淨重（g）
    pub net_weight_g: f64,

    /// 單件體積（mm³）
    pub volume_mm3: f64,

    /// 單穴投影面積（cm²）
    pub projected_area_cm2: f64,

    /// 最終穴數所需鎖模噸位
    pub required_tonnage: f64,

    /// 選用機台
    pub selected_machine: Machine,

    /// 機台是否滿足噸位與射出量限制
    pub machine_adequate: bool,

    /// 穴數
    pub cavities: u32,

    /// 年度可用生產時數
    pub available_hours: f64,

    /// 需求產能（件/小時）
    pub required_pph: f64,

    pub runner_weight_g: f64,
    pub paid_runner_weight_g: f64,
    pub shot_weight_g: f64,
    pub paid_shot_weight_g: f64,

    /// 週期時間分解
    pub cycle: CycleTimeBreakdown,

    /// 實際良品產能（件/小時）
    pub achieved_pph: f64,

    /// 有效不良率
    pub scrap_rate: f64,

    /// 年需求量
    pub annual_volume: f64,

    /// 穴數搜尋結束原因
    pub search_stop: SearchStop,

    /// 成本分解
    pub costs: CostBreakdown,

    /// 警告信息
    pub warnings: Vec<EstimateWarning>,
}

impl CalculationResult {
    /// 總週期時間（秒）
    pub fn cycle_time_s(&self) -> f64 {
        self.cycle.total_s()
    }

    /// 機台動作時間（秒）
    pub fn machine_time_s(&self) -> f64 {
        self.cycle.machine_s()
    }

    /// 單件總成本
    pub fn total_part_cost(&self) -> Decimal {
        self.costs.total_cost
    }

    /// 年度總成本 = 單件總成本 × 年需求量；溢位時飽和
    pub fn annual_total_cost(&self) -> Decimal {
        let (volume, _) = costing::saturating_decimal(self.annual_volume);
        self.costs
            .total_cost
            .saturating_mul(volume)
            .round_dp(costing::MONEY_DECIMALS)
    }

    /// 警告訊息文字
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.message.clone()).collect()
    }

    /// 是否有指定類型的警告
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// 估算警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateWarning {
    pub kind: WarningKind,
    pub message: String,
    pub severity: WarningSeverity,
}

impl EstimateWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            kind,
            message: message.into(),
            severity,
        }
    }

    pub fn info(kind: WarningKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, WarningSeverity::Info)
    }

    pub fn warning(kind: WarningKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, WarningSeverity::Warning)
    }

    pub fn error(kind: WarningKind, message: impl Into<String>) -> Self {
        Self::new(kind, message, WarningSeverity::Error)
    }
}

impl std::fmt::Display for EstimateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// 警告類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// 體積由外框尺寸估計
    VolumeFromBoundingBox,
    /// 年度可用時數為 0
    NoAvailableHours,
    /// 需求產能為 0
    ZeroProductionRequirement,
    /// 查無原料代碼，改用預設原料
    MaterialNotFound,
    /// 沒有機台能滿足噸位或射出量
    NoFeasibleMachine,
    /// 已達穴數上限仍未達到需求產能
    UnderCapacity,
    /// 輸入數值過大，金額超出可表示範圍而飽和
    ValueOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
