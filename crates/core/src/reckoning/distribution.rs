//! Penny-exact distribution using the Largest Remainder Method.
//!
//! Both helpers here guarantee that the parts they hand back sum EXACTLY to
//! the amount they were given. No quantum is lost or gained:
//! 1. Round every part half-up
//! 2. Measure the difference between the target and the rounded sum
//! 3. Hand the difference out one quantum at a time, largest remainder first

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use reckon_shared::types::{is_quantized, quantize, quantum, zero};

use super::error::ReckonError;

/// Splits an already-quantised amount into `divisor` near-equal parts.
///
/// Leftover quanta go to the first parts, so `10.00 / 3` is
/// `[3.34, 3.33, 3.33]`.
///
/// # Errors
///
/// Returns `ImproperlyQuantized` if `amount` carries more places than
/// `quantization`, `ZeroDivisor` if `divisor` is zero, and `Overflow` if
/// the rounded parts leave the representable range.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reckon_core::reckoning::divide_amount;
///
/// let parts = divide_amount(dec!(10.00), 3, 2).unwrap();
/// assert_eq!(parts, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
/// ```
pub fn divide_amount(
    amount: Decimal,
    divisor: u16,
    quantization: u32,
) -> Result<Vec<Decimal>, ReckonError> {
    if !is_quantized(amount, quantization) {
        return Err(ReckonError::ImproperlyQuantized {
            amount,
            quantization,
        });
    }
    if divisor == 0 {
        return Err(ReckonError::ZeroDivisor);
    }

    let factor = Decimal::from(divisor);
    let target = quantize(amount / factor, quantization);
    let mut parts = vec![target; usize::from(divisor)];

    let overflow = || ReckonError::Overflow(format!("dividing {amount} into {divisor} parts"));
    let unit = quantum(quantization);
    let mut difference = target
        .checked_mul(factor)
        .and_then(|spread| amount.checked_sub(spread))
        .ok_or_else(overflow)?;
    let step = if difference.is_sign_negative() {
        -unit
    } else {
        unit
    };
    // |difference| < divisor quanta, so one pass always suffices.
    for part in &mut parts {
        if difference.abs() < unit {
            break;
        }
        *part = part.checked_add(step).ok_or_else(overflow)?;
        difference -= step;
    }
    Ok(parts)
}

/// One line's exact value going into reconciliation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Share {
    pub id: i32,
    pub priority: i16,
    pub exact: Decimal,
    /// Pinned shares keep their rounded value.
    pub pinned: bool,
}

/// Rounds every share and nudges unpinned ones until they sum to `total`.
///
/// Only unpinned shares with a positive value take quanta, so discounts and
/// zero lines keep their rounded value. Candidates are ordered by remainder in the needed direction, then by
/// priority, then by id, all descending. The order cycles when the
/// difference exceeds the candidate count.
pub(crate) fn reconcile(
    total: Decimal,
    shares: &[Share],
    quantization: u32,
) -> Result<BTreeMap<i32, Decimal>, ReckonError> {
    let mut rounded: BTreeMap<i32, Decimal> = shares
        .iter()
        .map(|share| (share.id, quantize(share.exact, quantization)))
        .collect();

    let sum_rounded = rounded
        .values()
        .try_fold(zero(quantization), |acc, value| acc.checked_add(*value))
        .ok_or_else(|| ReckonError::Overflow("summing subtotals".to_string()))?;
    let mut difference = total - sum_rounded;
    let unit = quantum(quantization);
    if difference.abs() < unit {
        return Ok(rounded);
    }

    let step = if difference.is_sign_negative() {
        -unit
    } else {
        unit
    };
    let direction = if difference.is_sign_negative() {
        -Decimal::ONE
    } else {
        Decimal::ONE
    };
    let mut candidates: Vec<(Decimal, &Share)> = shares
        .iter()
        .filter(|share| !share.pinned && share.exact > Decimal::ZERO)
        .map(|share| {
            let remainder = share.exact - quantize(share.exact, quantization);
            (remainder * direction, share)
        })
        .collect();
    if candidates.is_empty() {
        return Err(ReckonError::NothingToReconcile { difference });
    }
    candidates.sort_by(|(ra, a), (rb, b)| {
        rb.cmp(ra)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| b.id.cmp(&a.id))
    });

    for (_, share) in candidates.iter().cycle() {
        if difference.abs() < unit {
            break;
        }
        if let Some(value) = rounded.get_mut(&share.id) {
            *value += step;
        }
        difference -= step;
    }
    Ok(rounded)
}
