//! # Molding Cost Engine
//!
//! 射出成型單件成本估算引擎。
//!
//! 由使用者輸入（外形、原料、年需求量、人工與管銷參數）推算：
//! 單件重量、鎖模噸位、穴數與機台、週期時間、產能，以及完整的成本分解。
//!
//! ```no_run
//! use molding::prelude::*;
//!
//! let calculator = MoldingCalculator::default();
//! let inputs = UserInputs::default().with_weight(45.0);
//! let result = calculator.calculate(&inputs);
//!
//! println!("{} 穴，單件成本 {}", result.cavities, result.costs.total_cost);
//! ```

pub use molding_optimizer::{CycleTimeBreakdown, SearchStop};
pub use molding_calc::{
    CalculationResult, CostBreakdown, EstimateWarning, MoldingCalculator, SensitivityAnalyzer,
    SensitivityPoint, WarningKind, WarningSeverity,
};
pub use molding_core::{Catalog, EngineConfig, MoldingError, Result, UserInputs};

/// 常用類型
pub mod prelude {
    pub use molding_calc::{
        CalculationResult, CostBreakdown, CostCategory, EstimateWarning, MoldingCalculator,
        SensitivityAnalyzer, SensitivityPoint, WarningKind, WarningSeverity,
    };
    pub use molding_core::{
        Catalog, EngineConfig, EstimateTemplate, Machine, Material, PurchasedItem, RunnerType,
        ShapeType, UserInputs,
    };
    pub use rust_decimal::Decimal;
}

/// 以內建目錄與預設配置估算單件成本
pub fn estimate(inputs: &UserInputs) -> CalculationResult {
    MoldingCalculator::default().calculate(inputs)
}

/// 從 JSON 讀取輸入並估算，結果以 JSON 回傳
pub fn estimate_json(inputs_json: &str) -> Result<String> {
    let inputs: UserInputs = serde_json::from_str(inputs_json)?;
    tracing::debug!("JSON 輸入解析完成：原料 {}", inputs.material_code);
    let result = MoldingCalculator::default().calculate_checked(&inputs)?;
    Ok(serde_json::to_string_pretty(&result)?)
}
