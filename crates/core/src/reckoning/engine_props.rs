//! Property-based tests for the reckoning engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use reckon_shared::types::quantize;

use super::get_totals;
use crate::line::{LineItem, LineType};

/// Strategy for a positive amount from 1.00 to 10,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a percentage from 0.01 to 20.00.
fn fee_percentage() -> impl Strategy<Value = Decimal> {
    (1i64..=2_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

/// Base lines at priority 0 with ids starting at 1.
fn base_lines() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(positive_amount(), 1..6).prop_map(|amounts| {
        amounts
            .into_iter()
            .zip(1..)
            .map(|(amount, id)| {
                LineItem::new(id, LineType::BasePrice, 0).with_amount(amount.to_string())
            })
            .collect()
    })
}

/// A fee line with arbitrary flags. Ids start at 100.
fn fee_line() -> impl Strategy<Value = (i16, Decimal, Decimal, bool, bool, bool)> {
    (
        1i16..5,
        fee_percentage(),
        (0i64..200).prop_map(|cents| Decimal::new(cents, 2)),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
}

fn mixed_lines() -> impl Strategy<Value = Vec<LineItem>> {
    (base_lines(), prop::collection::vec(fee_line(), 0..4)).prop_map(|(mut lines, fees)| {
        for (fee_id, (priority, percentage, amount, cascade_amount, cascade_percentage, back_into)) in
            (100..).zip(fees)
        {
            lines.push(LineItem {
                cascade_amount,
                cascade_percentage,
                back_into_percentage: back_into,
                ..LineItem::new(fee_id, LineType::OtherFee, priority * 100)
                    .with_percentage(percentage.to_string())
                    .with_amount(amount.to_string())
            });
        }
        lines
    })
}

fn with_discounts() -> impl Strategy<Value = Vec<LineItem>> {
    (mixed_lines(), prop::collection::vec(positive_amount(), 0..3)).prop_map(
        |(mut lines, discounts)| {
            for (id, amount) in (200..).zip(discounts) {
                lines.push(
                    LineItem::new(id, LineType::AddOn, 100).with_amount((-amount).to_string()),
                );
            }
            lines
        },
    )
}

fn shuffled<S>(strategy: S) -> impl Strategy<Value = (Vec<LineItem>, Vec<LineItem>)>
where
    S: Strategy<Value = Vec<LineItem>>,
{
    strategy.prop_flat_map(|lines| (Just(lines.clone()), Just(lines).prop_shuffle()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Subtotals always sum exactly to the total.
    #[test]
    fn prop_subtotals_sum_to_total(lines in mixed_lines()) {
        let acc = get_totals(&lines, 2).unwrap();
        let sum: Decimal = acc.subtotals.values().copied().sum();
        prop_assert_eq!(sum, acc.total);
        prop_assert_eq!(acc.subtotals.len(), lines.len());
    }

    /// Every rendered value carries exactly the requested places.
    #[test]
    fn prop_rendered_values_are_quantized(lines in mixed_lines(), q in 0u32..=4) {
        let calc = get_totals(&lines, q).unwrap().to_calculation();
        for value in calc.subtotals.values().chain([&calc.total, &calc.discount]) {
            let places = value.split('.').nth(1).map_or(0, str::len);
            prop_assert_eq!(places, q as usize);
        }
    }

    // =========================================================================
    // Determinism
    // =========================================================================

    /// Input order never changes the result.
    #[test]
    fn prop_order_independent((lines, reordered) in shuffled(mixed_lines())) {
        let first = get_totals(&lines, 2).unwrap();
        let second = get_totals(&reordered, 2).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The discount aggregate ignores input order.
    #[test]
    fn prop_discount_order_independent((lines, reordered) in shuffled(with_discounts())) {
        let first = get_totals(&lines, 2).unwrap();
        let second = get_totals(&reordered, 2).unwrap();
        prop_assert_eq!(first.discount, second.discount);
        prop_assert!(first.discount >= Decimal::ZERO);
    }

    // =========================================================================
    // Cascading
    // =========================================================================

    /// Fully cascading percentage lines never change the total.
    #[test]
    fn prop_cascading_keeps_total(
        bases in base_lines(),
        fees in prop::collection::vec((1i16..4, fee_percentage(), any::<bool>()), 1..4),
    ) {
        let base_total = quantize(
            bases
                .iter()
                .map(|line| line.amount.parse::<Decimal>().unwrap())
                .sum(),
            2,
        );
        let mut lines = bases;
        for (fee_id, (priority, percentage, back_into)) in (100..).zip(fees) {
            lines.push(
                LineItem::new(fee_id, LineType::Shield, priority)
                    .with_percentage(percentage.to_string())
                    .cascading(true)
                    .backing_into(back_into),
            );
        }
        let acc = get_totals(&lines, 2).unwrap();
        prop_assert_eq!(acc.total, base_total);
    }

    // =========================================================================
    // Frozen values
    // =========================================================================

    /// Frozen lines come out at exactly their committed value.
    #[test]
    fn prop_frozen_lines_stay_exact(
        lines in mixed_lines(),
        frozen in prop::collection::vec((1i16..5, positive_amount()), 1..3),
    ) {
        let mut lines = lines;
        for (id, (priority, value)) in (300..).zip(frozen.iter()) {
            lines.push(
                LineItem::new(id, LineType::OtherFee, priority * 100)
                    .with_percentage("15")
                    .frozen_at(value.to_string()),
            );
        }
        let acc = get_totals(&lines, 2).unwrap();
        for (id, (_, value)) in (300..).zip(frozen.iter()) {
            prop_assert_eq!(acc.subtotals[&id], *value);
        }
    }

    // =========================================================================
    // Back-into percentages
    // =========================================================================

    /// A non-cascading back-into fee is its percentage of the final total,
    /// to within one quantum.
    #[test]
    fn prop_back_into_share_of_total(
        base in positive_amount(),
        percentage in (1i64..5_000i64).prop_map(|h| Decimal::new(h, 2)),
    ) {
        let lines = [
            LineItem::new(1, LineType::BasePrice, 0).with_amount(base.to_string()),
            LineItem::new(2, LineType::Shield, 300)
                .with_percentage(percentage.to_string())
                .backing_into(true),
        ];
        let acc = get_totals(&lines, 2).unwrap();
        let fee = acc.subtotal(&lines[1]).unwrap();
        let expected = acc.total * percentage / Decimal::ONE_HUNDRED;
        prop_assert!((fee - expected).abs() <= Decimal::new(1, 2));
    }
}
