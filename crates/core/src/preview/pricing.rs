//! Pricing schedule types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::parse_decimal;

use crate::reckoning::ReckonError;

/// A user's service plan and its fee table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlan {
    /// Plan id.
    #[serde(default)]
    pub id: i32,
    /// Plan name; previews look plans up by it.
    pub name: String,
    /// Whether the monthly connected-account fee is waived.
    #[serde(default)]
    pub connection_fee_waived: bool,
    /// Flat fee per tracked deliverable when escrow is off.
    #[serde(default = "zero_string")]
    pub per_deliverable_price: String,
    /// Static part of the shield fee.
    #[serde(default = "zero_string")]
    pub shield_static_price: String,
    /// Percentage part of the shield fee.
    #[serde(default = "zero_string")]
    pub shield_percentage_price: String,
    /// How many orders may be tracked at once.
    #[serde(default)]
    pub max_simultaneous_orders: u16,
    /// Whether waitlisting is allowed.
    #[serde(default)]
    pub waitlisting: bool,
    /// Whether external invoicing is allowed.
    #[serde(default)]
    pub paypal_invoicing: bool,
}

/// Fees the card processor takes, as the platform expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorFees {
    /// Blended card charge percentage.
    pub card_percentage: String,
    /// Static part of the card charge.
    pub card_static: String,
    /// Extra percentage on payouts that cross borders.
    pub cross_border_percentage: String,
    /// Monthly charge for an active connected account.
    pub connect_monthly_fee: String,
    /// Static charge per payout.
    pub payout_static: String,
    /// Percentage charge per payout.
    pub payout_percentage: String,
}

/// Global pricing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    /// Available plans.
    pub plans: Vec<ServicePlan>,
    /// Smallest price an escrow deliverable may have.
    #[serde(default = "zero_string")]
    pub minimum_price: String,
    /// Table service percentage.
    #[serde(default = "zero_string")]
    pub table_percentage: String,
    /// Table service static amount.
    #[serde(default = "zero_string")]
    pub table_static: String,
    /// Tax rate on table sales.
    #[serde(default = "zero_string")]
    pub table_tax: String,
    /// Surcharge on the shield percentage for international sellers.
    #[serde(default = "zero_string")]
    pub international_conversion_percentage: String,
    /// Percentage of the light processing fee, e.g. on tips.
    #[serde(default = "zero_string")]
    pub processing_percentage: String,
    /// Static part of the light processing fee.
    #[serde(default = "zero_string")]
    pub processing_static: String,
    /// Name of the plan the marketplace promotes.
    #[serde(default)]
    pub preferred_plan: String,
    /// Processor fees. Without them no processor lines are produced.
    #[serde(default)]
    pub processor_fees: Option<ProcessorFees>,
}

fn zero_string() -> String {
    "0".to_string()
}

impl Pricing {
    /// Looks a plan up by name.
    #[must_use]
    pub fn plan(&self, name: &str) -> Option<&ServicePlan> {
        self.plans.iter().find(|plan| plan.name == name)
    }
}

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    #[serde(default)]
    pub id: i64,
    /// Listing name.
    #[serde(default)]
    pub name: String,
    /// Starting price.
    pub base_price: String,
    /// Sold through the virtual table.
    #[serde(default)]
    pub table_product: bool,
    /// Escrow may be added.
    #[serde(default)]
    pub escrow_upgradable: bool,
    /// Escrow is on by default.
    #[serde(default)]
    pub escrow_enabled: bool,
}

/// Parses a schedule value, naming the field on failure.
pub(crate) fn schedule_value(field: &str, raw: &str) -> Result<Decimal, ReckonError> {
    parse_decimal(raw).map_err(|_| ReckonError::InvalidPricing {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Checks a schedule value and hands back the original text.
pub(crate) fn schedule_text(field: &str, raw: &str) -> Result<String, ReckonError> {
    schedule_value(field, raw).map(|_| raw.to_string())
}
