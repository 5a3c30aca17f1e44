//! # Molding Optimizer
//!
//! 穴數/機台搜尋與週期時間模型

pub mod cavitation;
pub mod cycle_time;
pub mod runner;

// Re-export 主要類型
pub use cavitation::{CavitationOptimizer, CavityConfiguration, OptimizationRequest};
pub use cycle_time::{CycleTimeBreakdown, CycleTimeCalculator};
pub use runner::{RunnerCalculator, ShotWeights};

use serde::{Deserialize, Serialize};

/// 搜尋結束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStop {
    /// 找到達到需求產能的最小穴數
    DemandMet,
    /// 沒有機台的噸位足夠
    TonnageExhausted,
    /// 噸位足夠但目錄中沒有機台的射出量足夠
    ShotCapacityExhausted,
    /// 已達穴數上限仍未達到需求產能
    CavityLimit,
}

/// 優化結果
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 是否找到任何可行配置
    pub feasible: bool,

    /// 最後一個成功評估的配置
    pub best: Option<CavityConfiguration>,

    /// 搜尋結束原因
    pub stop: SearchStop,
}

impl OptimizationResult {
    pub fn new(best: Option<CavityConfiguration>, stop: SearchStop) -> Self {
        Self {
            feasible: best.is_some(),
            best,
            stop,
        }
    }

    /// 最佳配置是否達到需求產能
    pub fn meets_demand(&self) -> bool {
        self.stop == SearchStop::DemandMet
    }
}
