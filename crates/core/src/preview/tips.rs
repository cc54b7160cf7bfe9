//! Fee lines for tip invoices.

use super::context::TipLinesContext;
use super::pricing::{schedule_text, schedule_value};
use super::rules::{PROCESSING, processor_lines};
use crate::line::LineItem;
use crate::reckoning::ReckonError;

/// Processing line for a tip, plus what the card processor takes when the
/// schedule lists it. Tip fees always come out of the tip.
///
/// # Errors
///
/// `PreviewUnavailable` without a pricing schedule, `InvalidPricing` when a
/// schedule value is not numeric.
pub fn tip_fee_lines(context: &TipLinesContext) -> Result<Vec<LineItem>, ReckonError> {
    let pricing = context
        .pricing
        .as_ref()
        .ok_or_else(|| ReckonError::PreviewUnavailable("no pricing schedule".into()))?;

    let mut percentage = schedule_value("processing_percentage", &pricing.processing_percentage)?;
    if context.international {
        let surcharge = schedule_value(
            "international_conversion_percentage",
            &pricing.international_conversion_percentage,
        )?;
        percentage = percentage
            .checked_add(surcharge)
            .ok_or_else(|| ReckonError::Overflow("adding the conversion surcharge".into()))?;
    }

    let mut lines = vec![PROCESSING.fee(
        schedule_text("processing_static", &pricing.processing_static)?,
        percentage.to_string(),
        true,
        false,
    )];
    if let Some(fees) = &pricing.processor_fees {
        lines.extend(processor_lines(fees, context.international, false, true)?);
    }
    Ok(lines)
}
