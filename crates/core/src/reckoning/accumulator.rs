//! Reckoning results.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reckon_shared::types::{money_string, zero};

use crate::line::{LineItem, LineType};

/// Decimal outcome of one reckoning call.
///
/// All values are already quantised and the subtotals sum exactly to
/// `total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAccumulator {
    /// Grand total.
    pub total: Decimal,
    /// Magnitude of all negative line values.
    pub discount: Decimal,
    /// Subtotal per line id.
    pub subtotals: BTreeMap<i32, Decimal>,
    /// Decimal places every value carries.
    pub quantization: u32,
}

impl LineAccumulator {
    /// Returns an accumulator for no lines at all.
    #[must_use]
    pub fn empty(quantization: u32) -> Self {
        Self {
            total: zero(quantization),
            discount: zero(quantization),
            subtotals: BTreeMap::new(),
            quantization,
        }
    }

    /// Looks up a line's subtotal.
    #[must_use]
    pub fn subtotal(&self, line: &LineItem) -> Option<Decimal> {
        self.subtotals.get(&line.id).copied()
    }

    /// Sums the subtotals of the lines whose type is in `kinds`.
    #[must_use]
    pub fn total_for_types(&self, lines: &[LineItem], kinds: &[LineType]) -> Decimal {
        lines
            .iter()
            .filter(|line| kinds.contains(&line.kind))
            .filter_map(|line| self.subtotal(line))
            .fold(zero(self.quantization), |acc, value| acc + value)
    }

    /// Renders the string form.
    #[must_use]
    pub fn to_calculation(&self) -> Calculation {
        let q = self.quantization;
        Calculation {
            total: money_string(self.total, q),
            discount: money_string(self.discount, q),
            subtotals: self
                .subtotals
                .iter()
                .map(|(id, value)| (*id, money_string(*value, q)))
                .collect(),
        }
    }
}

/// Serialisable form of a [`LineAccumulator`].
///
/// Every value carries exactly the requested number of decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Grand total.
    pub total: String,
    /// Magnitude of all negative line values.
    pub discount: String,
    /// Subtotal per line id.
    pub subtotals: BTreeMap<i32, String>,
}

impl From<&LineAccumulator> for Calculation {
    fn from(acc: &LineAccumulator) -> Self {
        acc.to_calculation()
    }
}
