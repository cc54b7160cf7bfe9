//! Priority-banded reckoning.
//!
//! Lines resolve in ascending priority bands. Every line in a band sees the
//! same band-start total, so peers never see one another. A line's value is
//! either *added* (it grows the total) or *cascaded* (it is carved out of the
//! lines that resolved before it, in proportion to their values).

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use tracing::{debug, trace};

use reckon_shared::types::{MAX_QUANTIZATION, parse_decimal, quantize, zero};

use super::accumulator::{Calculation, LineAccumulator};
use super::distribution::{Share, reconcile};
use super::error::ReckonError;
use super::terms::{LineTerms, resolve};
use crate::line::{LineItem, LineType};

/// Groups lines into ascending priority bands.
///
/// Inside a band lines are ordered by id.
///
/// # Errors
///
/// Returns `DuplicateLineId` or `CascadeUnderAbovePriority` for lines that
/// cannot be reckoned together.
pub fn lines_by_priority(lines: &[LineItem]) -> Result<Vec<Vec<&LineItem>>, ReckonError> {
    let mut seen = HashSet::with_capacity(lines.len());
    let mut bands: BTreeMap<i16, Vec<&LineItem>> = BTreeMap::new();
    for line in lines {
        if !seen.insert(line.id) {
            return Err(ReckonError::DuplicateLineId(line.id));
        }
        if let Some(cascade_under) = line.cascade_under
            && cascade_under > line.priority
        {
            return Err(ReckonError::CascadeUnderAbovePriority {
                line_id: line.id,
                cascade_under,
                priority: line.priority,
            });
        }
        bands.entry(line.priority).or_default().push(line);
    }
    Ok(bands
        .into_values()
        .map(|mut band| {
            band.sort_by_key(|line| line.id);
            band
        })
        .collect())
}

/// Reckons `lines` into quantised totals.
///
/// # Errors
///
/// Returns a `ReckonError` for invalid input (duplicate ids, malformed
/// decimals, bad cascade bounds, excessive quantisation) or arithmetic that
/// cannot be carried out.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use reckon_core::{LineItem, LineType};
/// use reckon_core::reckoning::get_totals;
///
/// let lines = vec![
///     LineItem::new(1, LineType::BasePrice, 0).with_amount("10.00"),
///     LineItem::new(2, LineType::Shield, 1).with_percentage("10").cascading(true),
/// ];
/// let totals = get_totals(&lines, 2).unwrap();
/// assert_eq!(totals.total, dec!(10.00));
/// assert_eq!(totals.subtotal(&lines[0]), Some(dec!(9.00)));
/// ```
pub fn get_totals(lines: &[LineItem], quantization: u32) -> Result<LineAccumulator, ReckonError> {
    if quantization > MAX_QUANTIZATION {
        return Err(ReckonError::InvalidQuantization {
            quantization,
            max: MAX_QUANTIZATION,
        });
    }
    let bands = lines_by_priority(lines)?;
    let terms = lines
        .iter()
        .map(|line| LineTerms::parse(line).map(|t| (line.id, t)))
        .collect::<Result<HashMap<_, _>, _>>()?;

    let mut state = Running::new(quantization);
    for band in &bands {
        state.resolve_band(band, &terms)?;
    }

    let shares: Vec<Share> = lines
        .iter()
        .filter_map(|line| {
            state.subtotals.get(&line.id).map(|exact| Share {
                id: line.id,
                priority: line.priority,
                exact: *exact,
                pinned: line.is_frozen(),
            })
        })
        .collect();
    let subtotals = reconcile(state.total, &shares, quantization)?;
    let discount = quantize(state.discount, quantization);

    debug!(
        lines = lines.len(),
        bands = bands.len(),
        total = %state.total,
        discount = %discount,
        "reckoned line items"
    );

    Ok(LineAccumulator {
        total: state.total,
        discount,
        subtotals,
        quantization,
    })
}

/// Reckons `lines` into their string rendering.
///
/// # Errors
///
/// See [`get_totals`].
pub fn reckon(lines: &[LineItem], quantization: u32) -> Result<Calculation, ReckonError> {
    get_totals(lines, quantization).map(|acc| acc.to_calculation())
}

/// Reckons `lines` and returns only the grand total.
///
/// # Errors
///
/// See [`get_totals`].
pub fn reckon_lines(lines: &[LineItem], quantization: u32) -> Result<Decimal, ReckonError> {
    get_totals(lines, quantization).map(|acc| acc.total)
}

/// Sums the subtotals of the lines whose type is in `kinds`.
#[must_use]
pub fn total_for_types(acc: &LineAccumulator, lines: &[LineItem], kinds: &[LineType]) -> Decimal {
    acc.total_for_types(lines, kinds)
}

/// Sums decimal strings.
///
/// The result starts from a zero at `quantization` places; inputs with more
/// places keep their precision.
///
/// # Errors
///
/// Returns `InvalidDecimal` for the first malformed value, or `Overflow`.
pub fn sum(values: &[String], quantization: u32) -> Result<Decimal, ReckonError> {
    values.iter().enumerate().try_fold(zero(quantization), |acc, (index, raw)| {
        let value = parse_decimal(raw)
            .map_err(|e| ReckonError::invalid_decimal(format!("value {index}"), raw, &e))?;
        acc.checked_add(value)
            .ok_or_else(|| ReckonError::Overflow("summing values".to_string()))
    })
}

/// Running state carried from band to band.
struct Running<'a> {
    quantization: u32,
    total: Decimal,
    discount: Decimal,
    /// Exact (unrounded) subtotal per line id resolved so far.
    subtotals: BTreeMap<i32, Decimal>,
    /// Lines resolved so far, by id.
    resolved: HashMap<i32, &'a LineItem>,
}

impl<'a> Running<'a> {
    fn new(quantization: u32) -> Self {
        Self {
            quantization,
            total: zero(quantization),
            discount: Decimal::ZERO,
            subtotals: BTreeMap::new(),
            resolved: HashMap::new(),
        }
    }

    fn resolve_band(
        &mut self,
        band: &[&'a LineItem],
        terms: &HashMap<i32, LineTerms>,
    ) -> Result<(), ReckonError> {
        let start = self.total;
        let mut added = Decimal::ZERO;
        let mut reductions: BTreeMap<i32, Decimal> = BTreeMap::new();
        let mut own_values = Vec::with_capacity(band.len());

        for &line in band {
            let Some(line_terms) = terms.get(&line.id) else {
                continue;
            };
            let resolution = resolve(line, line_terms, start)?;
            let mut line_added = resolution.added;
            if !resolution.cascaded.is_zero()
                && !self.spread(line, resolution.cascaded, &mut reductions)?
            {
                // Nothing below can absorb it, so it lands on the total.
                line_added = line_added.checked_add(resolution.cascaded).ok_or_else(|| {
                    ReckonError::Overflow(format!("cascading line {}", line.id))
                })?;
            }
            added = added
                .checked_add(line_added)
                .ok_or_else(|| ReckonError::Overflow("accumulating the total".to_string()))?;
            own_values.push((line, resolution.own));
        }

        for (id, reduction) in reductions {
            if let Some(value) = self.subtotals.get_mut(&id) {
                *value = value
                    .checked_sub(reduction)
                    .ok_or_else(|| ReckonError::Overflow(format!("reducing line {id}")))?;
            }
        }
        self.total = self
            .total
            .checked_add(quantize(added, self.quantization))
            .ok_or_else(|| ReckonError::Overflow("accumulating the total".to_string()))?;
        for (line, own) in own_values {
            if own < Decimal::ZERO {
                self.discount = self
                    .discount
                    .checked_sub(own)
                    .ok_or_else(|| ReckonError::Overflow("accumulating the discount".to_string()))?;
            }
            self.subtotals.insert(line.id, own);
            self.resolved.insert(line.id, line);
        }

        trace!(
            priority = band.first().map(|line| line.priority),
            lines = band.len(),
            start = %start,
            total = %self.total,
            "resolved band"
        );
        Ok(())
    }

    /// Spreads `value` over the lines that absorb cascades from `line`.
    ///
    /// Returns false if no line can absorb it.
    fn spread(
        &self,
        line: &LineItem,
        value: Decimal,
        reductions: &mut BTreeMap<i32, Decimal>,
    ) -> Result<bool, ReckonError> {
        let absorbers: Vec<(i32, Decimal)> = self
            .subtotals
            .iter()
            .filter(|(id, current)| {
                self.resolved.get(*id).is_some_and(|other| {
                    !other.is_frozen()
                        && line.cascade_under.is_none_or(|bound| other.priority < bound)
                        && **current >= Decimal::ZERO
                })
            })
            .map(|(id, current)| (*id, *current))
            .collect();
        if absorbers.is_empty() {
            return Ok(false);
        }

        let overflow = || ReckonError::Overflow(format!("cascading line {}", line.id));
        let basis = absorbers
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, current)| acc.checked_add(*current))
            .ok_or_else(overflow)?;
        let count = Decimal::from(absorbers.len());
        for (id, current) in absorbers {
            let portion = if basis.is_zero() {
                value / count
            } else {
                value
                    .checked_mul(current)
                    .and_then(|v| v.checked_div(basis))
                    .ok_or_else(overflow)?
            };
            let entry = reductions.entry(id).or_insert(Decimal::ZERO);
            *entry = entry.checked_add(portion).ok_or_else(overflow)?;
        }
        Ok(true)
    }
}
