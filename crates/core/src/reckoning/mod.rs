//! Line item reckoning.
//!
//! Turns an unordered list of line items into per-line subtotals, a grand
//! total and a discount aggregate.
//!
//! CRITICAL: Every value is a `rust_decimal::Decimal` and every output is
//! quantised with round-half-up. The subtotals ALWAYS sum exactly to the
//! total; leftover quanta are handed out with the Largest Remainder Method.

mod accumulator;
mod distribution;
mod engine;
mod error;
mod terms;

#[cfg(test)]
mod engine_props;

pub use accumulator::{Calculation, LineAccumulator};
pub use distribution::divide_amount;
pub use engine::{get_totals, lines_by_priority, reckon, reckon_lines, sum, total_for_types};
pub use error::ReckonError;
