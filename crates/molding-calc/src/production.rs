//! 年度可用時數與需求產能

use molding_core::UserInputs;
use serde::{Deserialize, Serialize};

/// 生產目標
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionTarget {
    /// 年度可用時數 = 工作日 × 班數 × 每班時數 × OEE
    pub available_hours: f64,
    /// 需求產能（件/小時）；可用時數為 0 時為 0
    pub required_pph: f64,
}

impl ProductionTarget {
    pub fn from_inputs(inputs: &UserInputs) -> Self {
        let available_hours =
            inputs.working_days * inputs.shifts_per_day * inputs.hours_per_shift * inputs.oee;

        let required_pph = if available_hours > 0.0 {
            inputs.annual_volume / available_hours
        } else {
            0.0
        };

        Self {
            available_hours,
            required_pph,
        }
    }

    pub fn has_available_hours(&self) -> bool {
        self.available_hours > 0.0
    }
}
