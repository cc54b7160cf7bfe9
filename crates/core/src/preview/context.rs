//! Inputs to the line builders.

use serde::{Deserialize, Serialize};

use reckon_shared::types::DEFAULT_QUANTIZATION;

use super::pricing::{Pricing, Product};
use crate::line::LineItem;

fn default_quantization() -> u32 {
    DEFAULT_QUANTIZATION
}

/// Everything the preview of a not-yet-created invoice depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Selected plan. `None` or unknown means no preview.
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Pricing schedule. `None` means no preview.
    #[serde(default)]
    pub pricing: Option<Pricing>,
    /// Price as typed by the user. May be non-numeric.
    pub value: String,
    /// Product the invoice is for.
    #[serde(default)]
    pub product: Option<Product>,
    /// Escrow is on.
    #[serde(default)]
    pub escrow_enabled: bool,
    /// The seller is international.
    #[serde(default)]
    pub international: bool,
    /// Take fees out of the price instead of adding them on top.
    #[serde(default)]
    pub cascade: bool,
    /// User issuing the invoice.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Decimal places of the amounts produced.
    #[serde(default = "default_quantization")]
    pub quantization: u32,
}

/// Fee lines for a deliverable whose price and extras are already known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverableLinesContext {
    /// Base price used when `extra_lines` holds no base price line.
    pub base_price: String,
    /// Sold through the virtual table.
    #[serde(default)]
    pub table_product: bool,
    /// Escrow is on.
    #[serde(default)]
    pub escrow_enabled: bool,
    /// The seller is international.
    #[serde(default)]
    pub international: bool,
    /// Take fees out of the price instead of adding them on top.
    #[serde(default)]
    pub cascade: bool,
    /// Lines already on the deliverable.
    #[serde(default)]
    pub extra_lines: Vec<LineItem>,
    /// Selected plan.
    #[serde(default)]
    pub plan_name: Option<String>,
    /// Pricing schedule.
    #[serde(default)]
    pub pricing: Option<Pricing>,
    /// User issuing the invoice.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Decimal places of the amounts produced.
    #[serde(default = "default_quantization")]
    pub quantization: u32,
}

/// Fee lines for a tip invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipLinesContext {
    /// Pricing schedule.
    #[serde(default)]
    pub pricing: Option<Pricing>,
    /// The recipient is international.
    #[serde(default)]
    pub international: bool,
}
