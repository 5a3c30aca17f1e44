//! 使用者輸入模型
//!
//! 引擎只接受已型別化的數值與列舉；字串轉換與空值處理屬於外部 UI 層。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MoldingError, Result};

/// 投影面積估算用的外形分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    Rectangle,
    Round,
    Complex,
}

/// 流道系統類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunnerType {
    /// 熱流道
    #[serde(rename = "HOT")]
    Hot,
    /// 半熱流道
    #[serde(rename = "SEMI_HOT")]
    SemiHot,
    /// 冷流道（兩板模）
    #[serde(rename = "COLD_2_PLATE")]
    Cold2Plate,
    /// 冷流道（三板模）
    #[serde(rename = "COLD_3_PLATE")]
    Cold3Plate,
}

/// 外購子件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasedItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    /// 單價
    pub price: Decimal,
    /// 子件自身的不良率（0-1）
    pub scrap_rate: f64,
}

impl PurchasedItem {
    /// 創建新的外購子件
    pub fn new(name: impl Into<String>, price: Decimal, scrap_rate: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            scrap_rate,
        }
    }
}

/// 數量類輸入的上限（尺寸、重量、年需求量、人數等）
pub const MAX_INPUT_MAGNITUDE: f64 = 1.0e12;

/// 金額類輸入的上限（1e12）
pub const MAX_MONEY_INPUT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// 單次估算的完整輸入快照
///
/// 反序列化時缺少的欄位採用 [`UserInputs::default`] 的值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInputs {
    // 幾何（mm），未知時為 None
    pub length_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub wall_thickness_mm: Option<f64>,

    /// 明確指定的投影面積（mm²），> 0 時優先於外形估算
    pub projected_area_mm2: Option<f64>,
    pub shape: ShapeType,

    /// 明確指定的體積（mm³）
    pub volume_mm3: Option<f64>,
    /// 明確指定的淨重（g），同時指定時優先於體積
    pub weight_g: Option<f64>,

    // 生產
    pub annual_volume: f64,
    pub working_days: f64,
    pub shifts_per_day: f64,
    pub hours_per_shift: f64,
    /// 設備綜合效率（0-1）
    pub oee: f64,
    /// 不良率（0-1），None 時依原料採用預設值
    pub scrap_rate: Option<f64>,

    // 原料與模具
    pub material_code: String,
    pub glass_filled: bool,
    pub runner_type: RunnerType,

    // 人工
    pub operators: f64,
    pub operator_rate: Decimal,
    /// 人工附加比例（0.3 = 30%）
    pub labor_overhead: f64,

    // 周邊設備
    pub use_robot: bool,
    pub use_conveyor: bool,

    /// 原料價格覆寫（每公斤），優先於目錄價格
    pub resin_price_override: Option<Decimal>,

    // 管銷與利潤
    pub packaging_cost_per_part: Decimal,
    pub sga_rate: Decimal,
    pub profit_rate: Decimal,

    pub purchased_items: Vec<PurchasedItem>,
}

impl Default for UserInputs {
    fn default() -> Self {
        Self {
            length_mm: Some(100.0),
            width_mm: Some(50.0),
            height_mm: Some(20.0),
            wall_thickness_mm: Some(2.0),
            projected_area_mm2: None,
            shape: ShapeType::Rectangle,
            volume_mm3: None,
            weight_g: None,
            annual_volume: 100_000.0,
            working_days: 250.0,
            shifts_per_day: 2.0,
            hours_per_shift: 8.0,
            oee: 0.85,
            scrap_rate: Some(0.02),
            material_code: "PP_HOMO".to_string(),
            glass_filled: false,
            runner_type: RunnerType::Cold2Plate,
            operators: 1.0,
            operator_rate: Decimal::from(150),
            labor_overhead: 0.3,
            use_robot: false,
            use_conveyor: false,
            resin_price_override: None,
            packaging_cost_per_part: Decimal::new(50, 2),
            sga_rate: Decimal::new(10, 2),
            profit_rate: Decimal::new(15, 2),
            purchased_items: Vec::new(),
        }
    }
}

impl UserInputs {
    /// 建構器模式：設置外形尺寸（mm）
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64, wall: f64) -> Self {
        self.length_mm = Some(length);
        self.width_mm = Some(width);
        self.height_mm = Some(height);
        self.wall_thickness_mm = Some(wall);
        self
    }

    /// 建構器模式：設置淨重（g）
    pub fn with_weight(mut self, weight_g: f64) -> Self {
        self.weight_g = Some(weight_g);
        self
    }

    /// 建構器模式：設置體積（mm³）
    pub fn with_volume(mut self, volume_mm3: f64) -> Self {
        self.volume_mm3 = Some(volume_mm3);
        self
    }

    /// 建構器模式：設置投影面積（mm²）
    pub fn with_projected_area(mut self, area_mm2: f64) -> Self {
        self.projected_area_mm2 = Some(area_mm2);
        self
    }

    /// 建構器模式：設置年需求量
    pub fn with_annual_volume(mut self, annual_volume: f64) -> Self {
        self.annual_volume = annual_volume;
        self
    }

    /// 建構器模式：設置原料
    pub fn with_material(mut self, code: impl Into<String>) -> Self {
        self.material_code = code.into();
        self
    }

    /// 建構器模式：設置流道類型
    pub fn with_runner_type(mut self, runner_type: RunnerType) -> Self {
        self.runner_type = runner_type;
        self
    }

    /// 建構器模式：設置不良率（None 表示採用預設值）
    pub fn with_scrap_rate(mut self, scrap_rate: Option<f64>) -> Self {
        self.scrap_rate = scrap_rate;
        self
    }

    /// 建構器模式：添加外購子件
    pub fn with_purchased_item(mut self, item: PurchasedItem) -> Self {
        self.purchased_items.push(item);
        self
    }

    /// 外形尺寸，未知視為 0
    pub fn length(&self) -> f64 {
        self.length_mm.unwrap_or(0.0)
    }

    pub fn width(&self) -> f64 {
        self.width_mm.unwrap_or(0.0)
    }

    pub fn height(&self) -> f64 {
        self.height_mm.unwrap_or(0.0)
    }

    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness_mm.unwrap_or(0.0)
    }

    /// 驗證輸入（供外部邊界在進入引擎前呼叫）
    pub fn validate(&self) -> Result<()> {
        let optional_lengths = [
            ("length_mm", self.length_mm),
            ("width_mm", self.width_mm),
            ("height_mm", self.height_mm),
            ("wall_thickness_mm", self.wall_thickness_mm),
            ("projected_area_mm2", self.projected_area_mm2),
            ("volume_mm3", self.volume_mm3),
            ("weight_g", self.weight_g),
        ];
        for (field, value) in optional_lengths {
            if let Some(v) = value {
                non_negative(field, v)?;
            }
        }

        non_negative("annual_volume", self.annual_volume)?;
        non_negative("working_days", self.working_days)?;
        non_negative("shifts_per_day", self.shifts_per_day)?;
        non_negative("hours_per_shift", self.hours_per_shift)?;
        non_negative("operators", self.operators)?;
        non_negative("labor_overhead", self.labor_overhead)?;

        if !(0.0..=1.0).contains(&self.oee) {
            return Err(MoldingError::invalid_input("oee", "必須介於 0 與 1 之間"));
        }
        if let Some(rate) = self.scrap_rate {
            fraction_below_one("scrap_rate", rate)?;
        }

        let money = [
            ("operator_rate", Some(self.operator_rate)),
            ("resin_price_override", self.resin_price_override),
            ("packaging_cost_per_part", Some(self.packaging_cost_per_part)),
            ("sga_rate", Some(self.sga_rate)),
            ("profit_rate", Some(self.profit_rate)),
        ];
        for (field, value) in money {
            if let Some(v) = value {
                money_in_range(field, v)?;
            }
        }

        for item in &self.purchased_items {
            money_in_range(&format!("purchased_items[{}].price", item.name), item.price)?;
            fraction_below_one(&format!("purchased_items[{}].scrap_rate", item.name), item.scrap_rate)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MoldingError::invalid_input(
            field,
            format!("必須為有限的非負數，實際為 {}", value),
        ));
    }
    if value > MAX_INPUT_MAGNITUDE {
        return Err(MoldingError::invalid_input(
            field,
            format!("不可超過 {:e}，實際為 {}", MAX_INPUT_MAGNITUDE, value),
        ));
    }
    Ok(())
}

fn money_in_range(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoldingError::invalid_input(field, "不可為負數"));
    }
    if value > MAX_MONEY_INPUT {
        return Err(MoldingError::invalid_input(
            field,
            format!("不可超過 {}，實際為 {}", MAX_MONEY_INPUT, value),
        ));
    }
    Ok(())
}

fn fraction_below_one(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..1.0).contains(&value) {
        return Err(MoldingError::invalid_input(
            field,
            format!("必須介於 0（含）與 1（不含）之間，實際為 {}", value),
        ));
    }
    Ok(())
}
