//! # Molding Core
//!
//! 射出成型成本估算的核心資料模型與參考資料

pub mod catalog;
pub mod config;
pub mod inputs;
pub mod machine;
pub mod material;
pub mod presets;
mod reference_data;

// Re-export 主要類型
pub use catalog::{
    AuxiliaryEquipment, AuxiliaryKind, Catalog, RunnerRatio, ShapeFactors, WeightBracket,
};
pub use config::EngineConfig;
pub use inputs::{PurchasedItem, RunnerType, ShapeType, UserInputs};
pub use machine::Machine;
pub use material::{CoefficientRange, Material};
pub use presets::{AutomationLevel, EstimateTemplate, ScrapCondition, VolumeProfile};

/// 成本引擎錯誤類型
///
/// 估算本身不會失敗；錯誤只出現在邊界（輸入驗證、目錄載入、配置載入）。
#[derive(Debug, thiserror::Error)]
pub enum MoldingError {
    #[error("無效的輸入 '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("無效的參考目錄: {0}")]
    InvalidCatalog(String),

    #[error("無效的引擎配置: {0}")]
    InvalidConfig(String),

    #[error("序列化錯誤: {0}")]
    Serialization(String),
}

impl MoldingError {
    /// 建立輸入驗證錯誤
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MoldingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MoldingError>;
