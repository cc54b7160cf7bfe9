//! Parsed line terms and per-line resolution.

use rust_decimal::Decimal;

use reckon_shared::types::parse_decimal;

use super::error::ReckonError;
use crate::line::LineItem;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A line's decimal fields, parsed once up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineTerms {
    pub amount: Decimal,
    /// Percentage as a fraction: `8.25` percent is `0.0825`.
    pub multiplier: Decimal,
    pub frozen: Option<Decimal>,
}

impl LineTerms {
    pub(crate) fn parse(line: &LineItem) -> Result<Self, ReckonError> {
        let field = |name: &str, raw: &str| {
            parse_decimal(raw)
                .map_err(|e| ReckonError::invalid_decimal(format!("line {} {name}", line.id), raw, &e))
        };
        let amount = field("amount", &line.amount)?;
        let percentage = field("percentage", &line.percentage)?;
        let frozen = line
            .frozen_value
            .as_deref()
            .map(|raw| field("frozen_value", raw))
            .transpose()?;
        Ok(Self {
            amount,
            multiplier: percentage / HUNDRED,
            frozen,
        })
    }
}

/// How one line's value splits, measured against its band-start total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolution {
    /// The line's own value, which becomes its subtotal.
    pub own: Decimal,
    /// Portion taken out of lower-priority lines.
    pub cascaded: Decimal,
    /// Portion that grows the total.
    pub added: Decimal,
}

fn overflow(line: &LineItem) -> ReckonError {
    ReckonError::Overflow(format!("resolving line {}", line.id))
}

/// Resolves `line` against `start`, the total before its band.
pub(crate) fn resolve(
    line: &LineItem,
    terms: &LineTerms,
    start: Decimal,
) -> Result<Resolution, ReckonError> {
    if let Some(frozen) = terms.frozen {
        return Ok(split(frozen, frozen, line.cascade_amount, Decimal::ZERO, false));
    }

    let m = terms.multiplier;
    let percentage_part = if !line.back_into_percentage {
        start.checked_mul(m).ok_or_else(|| overflow(line))?
    } else if line.cascade_percentage {
        // The fee is already inside `start`.
        let divisor = Decimal::ONE + m;
        if divisor.is_zero() {
            return Err(division_by_zero(line, m));
        }
        start
            .checked_div(divisor)
            .and_then(|v| v.checked_mul(m))
            .ok_or_else(|| overflow(line))?
    } else {
        // The fee must come out as `m` of the total after it is added.
        let inner = if line.cascade_amount {
            start
        } else {
            start.checked_add(terms.amount).ok_or_else(|| overflow(line))?
        };
        let divisor = Decimal::ONE - m;
        if divisor.is_zero() {
            return Err(division_by_zero(line, m));
        }
        inner
            .checked_div(divisor)
            .and_then(|v| v.checked_sub(inner))
            .ok_or_else(|| overflow(line))?
    };
    let percentage_part =
        if line.back_into_percentage && m > Decimal::ZERO && percentage_part < Decimal::ZERO {
            Decimal::ZERO
        } else {
            percentage_part
        };

    let own = percentage_part
        .checked_add(terms.amount)
        .ok_or_else(|| overflow(line))?;
    Ok(split(
        own,
        terms.amount,
        line.cascade_amount,
        percentage_part,
        line.cascade_percentage,
    ))
}

fn split(
    own: Decimal,
    flat: Decimal,
    cascade_flat: bool,
    percentage_part: Decimal,
    cascade_percentage: bool,
) -> Resolution {
    let mut cascaded = Decimal::ZERO;
    let mut added = Decimal::ZERO;
    if cascade_flat {
        cascaded += flat;
    } else {
        added += flat;
    }
    if cascade_percentage {
        cascaded += percentage_part;
    } else {
        added += percentage_part;
    }
    Resolution {
        own,
        cascaded,
        added,
    }
}

fn division_by_zero(line: &LineItem, multiplier: Decimal) -> ReckonError {
    ReckonError::DivisionByZero {
        line_id: line.id,
        percentage: multiplier * HUNDRED,
    }
}
