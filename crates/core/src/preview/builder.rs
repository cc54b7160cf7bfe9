//! Fee lines for invoices that have not been created yet.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use reckon_shared::types::{money_string, parse_decimal};

use super::context::{DeliverableLinesContext, PreviewConfig};
use super::pricing::{Pricing, schedule_text, schedule_value};
use super::rules::{ADD_ON, BASE_PRICE, SHIELD, TABLE_SERVICE, TAX, TRACKING, processor_lines};
use crate::line::{LineItem, LineType};
use crate::reckoning::{ReckonError, reckon_lines};

/// Borrowed view shared by both entry points.
struct Deliverable<'a> {
    base_price: &'a str,
    extra_lines: &'a [LineItem],
    table_product: bool,
    escrow_enabled: bool,
    international: bool,
    cascade: bool,
    plan_name: Option<&'a str>,
    pricing: Option<&'a Pricing>,
    user_id: Option<i64>,
    quantization: u32,
}

fn unavailable(reason: impl Into<String>) -> ReckonError {
    ReckonError::PreviewUnavailable(reason.into())
}

/// Lines a not-yet-created invoice would carry, for live display.
///
/// Never fails. Anything that keeps a preview from being built gives an
/// empty list; a malformed pricing schedule is logged as well.
pub fn build_preview_lines(config: &PreviewConfig) -> Vec<LineItem> {
    match invoice_lines(config) {
        Ok(lines) => lines,
        Err(ReckonError::PreviewUnavailable(reason)) => {
            debug!(%reason, "No invoice preview");
            Vec::new()
        }
        Err(err) => {
            warn!(error = %err, code = err.error_code(), "Invoice preview dropped");
            Vec::new()
        }
    }
}

/// Strict form of [`build_preview_lines`].
///
/// # Errors
///
/// `PreviewUnavailable` when there is no plan, no pricing schedule or no
/// numeric price. Other variants when the schedule itself is malformed.
pub fn invoice_lines(config: &PreviewConfig) -> Result<Vec<LineItem>, ReckonError> {
    let value = parse_decimal(&config.value)
        .map_err(|_| unavailable(format!("price '{}' is not numeric", config.value)))?;

    let (base, table_product) = match &config.product {
        Some(product) => {
            let base = parse_decimal(&product.base_price).map_err(|_| {
                unavailable(format!(
                    "product base price '{}' is not numeric",
                    product.base_price
                ))
            })?;
            (base, product.table_product)
        }
        None => (value, false),
    };

    let mut extra_lines = Vec::new();
    if config.product.is_some() {
        let add_on = value
            .checked_sub(base)
            .ok_or_else(|| ReckonError::Overflow("computing the add-on".into()))?;
        if add_on > Decimal::ZERO {
            extra_lines.push(ADD_ON.priced(money_string(add_on, config.quantization), config.user_id));
        }
    }

    let base_price = money_string(base, config.quantization);
    build(&Deliverable {
        base_price: &base_price,
        extra_lines: &extra_lines,
        table_product,
        escrow_enabled: config.escrow_enabled,
        international: config.international,
        cascade: config.cascade,
        plan_name: config.plan_name.as_deref(),
        pricing: config.pricing.as_ref(),
        user_id: config.user_id,
        quantization: config.quantization,
    })
}

/// Fee lines for a deliverable whose price and extras are already known.
///
/// A `BasePrice` line among the extras stands in for the synthetic base.
///
/// # Errors
///
/// As [`invoice_lines`], plus any reckoning error from the extra lines.
pub fn deliverable_lines(context: &DeliverableLinesContext) -> Result<Vec<LineItem>, ReckonError> {
    build(&Deliverable {
        base_price: &context.base_price,
        extra_lines: &context.extra_lines,
        table_product: context.table_product,
        escrow_enabled: context.escrow_enabled,
        international: context.international,
        cascade: context.cascade,
        plan_name: context.plan_name.as_deref(),
        pricing: context.pricing.as_ref(),
        user_id: context.user_id,
        quantization: context.quantization,
    })
}

fn build(request: &Deliverable<'_>) -> Result<Vec<LineItem>, ReckonError> {
    let plan_name = request
        .plan_name
        .ok_or_else(|| unavailable("no plan selected"))?;
    let pricing = request
        .pricing
        .ok_or_else(|| unavailable("no pricing schedule"))?;
    let plan = pricing
        .plan(plan_name)
        .ok_or_else(|| unavailable(format!("plan '{plan_name}' is not in the schedule")))?;
    let tracking_price = schedule_value("per_deliverable_price", &plan.per_deliverable_price)?;

    let mut lines = Vec::with_capacity(request.extra_lines.len() + 6);
    if !request
        .extra_lines
        .iter()
        .any(|line| line.kind == LineType::BasePrice)
    {
        parse_decimal(request.base_price).map_err(|_| {
            unavailable(format!("base price '{}' is not numeric", request.base_price))
        })?;
        lines.push(BASE_PRICE.priced(request.base_price.to_string(), request.user_id));
    }
    lines.extend_from_slice(request.extra_lines);

    let subtotal = reckon_lines(&lines, request.quantization)?;
    let handled = subtotal > Decimal::ZERO;
    let escrow = handled && request.escrow_enabled;
    let cascade = request.cascade;

    if request.table_product {
        lines.push(TABLE_SERVICE.fee(
            schedule_text("table_static", &pricing.table_static)?,
            schedule_text("table_percentage", &pricing.table_percentage)?,
            cascade,
            !cascade,
        ));
        lines.push(TAX.fee(
            "0".to_string(),
            schedule_text("table_tax", &pricing.table_tax)?,
            cascade,
            true,
        ));
    } else if escrow {
        let mut percentage =
            schedule_value("shield_percentage_price", &plan.shield_percentage_price)?;
        if request.international {
            let surcharge = schedule_value(
                "international_conversion_percentage",
                &pricing.international_conversion_percentage,
            )?;
            percentage = percentage
                .checked_add(surcharge)
                .ok_or_else(|| ReckonError::Overflow("adding the conversion surcharge".into()))?;
        }
        lines.push(SHIELD.fee(
            schedule_text("shield_static_price", &plan.shield_static_price)?,
            percentage.to_string(),
            cascade,
            !cascade,
        ));
    } else if tracking_price > Decimal::ZERO {
        lines.push(TRACKING.fee(
            plan.per_deliverable_price.clone(),
            "0".to_string(),
            cascade,
            !cascade,
        ));
    }

    if handled
        && (request.table_product || request.escrow_enabled)
        && let Some(fees) = &pricing.processor_fees
    {
        lines.extend(processor_lines(
            fees,
            request.international,
            !plan.connection_fee_waived,
            cascade,
        )?);
    }

    Ok(lines)
}
