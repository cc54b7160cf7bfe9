//! Fixed-point money helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is a `rust_decimal::Decimal`, and every value that leaves the
//! engine is quantised to a fixed number of decimal places with round-half-up,
//! the same rule the server-side twin of the engine applies.

use rust_decimal::{Decimal, RoundingStrategy};

/// Highest number of decimal places the engine will quantise to.
pub const MAX_QUANTIZATION: u32 = 10;

/// Default quantisation for currency amounts (cents).
pub const DEFAULT_QUANTIZATION: u32 = 2;

/// Rounding rule applied whenever a value is quantised.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Returns a zero carrying `quantization` decimal places, e.g. `0.00`.
#[must_use]
pub fn zero(quantization: u32) -> Decimal {
    Decimal::new(0, quantization)
}

/// Returns the smallest representable step at `quantization`.
///
/// `quantum(2)` is `0.01`, `quantum(0)` is `1`.
#[must_use]
pub fn quantum(quantization: u32) -> Decimal {
    Decimal::new(1, quantization)
}

/// Rounds `amount` half-up to `quantization` places and pads the scale so
/// the value always prints with exactly that many places.
///
/// Zero results are normalised to a positive zero.
#[must_use]
pub fn quantize(amount: Decimal, quantization: u32) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(quantization, ROUNDING);
    if rounded.is_zero() {
        return zero(quantization);
    }
    rounded.rescale(quantization);
    rounded
}

/// Returns true if `amount` carries no precision beyond `quantization`.
#[must_use]
pub fn is_quantized(amount: Decimal, quantization: u32) -> bool {
    amount.round_dp_with_strategy(quantization, RoundingStrategy::ToZero) == amount
}

/// Renders `amount` as a quantised string such as `"12.50"`.
#[must_use]
pub fn money_string(amount: Decimal, quantization: u32) -> String {
    quantize(amount, quantization).to_string()
}

/// Parses a fixed-point decimal string without any coercion.
///
/// Empty strings, stray characters and values with more precision than a
/// `Decimal` can hold are all rejected.
///
/// # Errors
///
/// Returns the underlying parse error if `raw` is not a valid decimal.
pub fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str_exact(raw)
}
