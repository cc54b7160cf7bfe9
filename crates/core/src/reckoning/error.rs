//! Reckoning error types.

use rust_decimal::Decimal;
use thiserror::Error;

use reckon_shared::AppError;

/// Errors that can occur while reckoning or building line items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReckonError {
    // ========== Input Errors ==========
    /// A decimal string could not be parsed.
    #[error("Invalid decimal in {field}: '{value}' ({reason})")]
    InvalidDecimal {
        /// Where the value came from, e.g. `line 3 amount`.
        field: String,
        /// The offending text.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// Two lines share an id.
    #[error("Line ID {0} appears more than once")]
    DuplicateLineId(i32),

    /// A line lets lines at or above its own priority absorb its value.
    #[error("Line ID {line_id} has higher cascade_under ({cascade_under}) than priority ({priority})")]
    CascadeUnderAbovePriority {
        /// Offending line.
        line_id: i32,
        /// Its cascade bound.
        cascade_under: i16,
        /// Its priority.
        priority: i16,
    },

    /// Quantisation outside the supported range.
    #[error("Quantization {quantization} exceeds the maximum of {max}")]
    InvalidQuantization {
        /// Requested decimal places.
        quantization: u32,
        /// Highest supported value.
        max: u32,
    },

    // ========== Arithmetic Errors ==========
    /// A back-into percentage divides by zero (e.g. 100% or -100%).
    #[error("Line ID {line_id} backs into a percentage of {percentage}%, which divides by zero")]
    DivisionByZero {
        /// Offending line.
        line_id: i32,
        /// Its percentage.
        percentage: Decimal,
    },

    /// A value left the representable range.
    #[error("Arithmetic overflow while {0}")]
    Overflow(String),

    /// The total and the rounded subtotals disagree and no unfrozen positive
    /// line may take up the difference.
    #[error("Cannot reconcile a difference of {difference}: no unfrozen line has a positive value")]
    NothingToReconcile {
        /// Total minus the sum of the rounded subtotals.
        difference: Decimal,
    },

    // ========== Distribution Errors ==========
    /// An amount to divide carries more precision than the quantisation.
    #[error("Amount {amount} is improperly quantized to {quantization} places. Cannot divide.")]
    ImproperlyQuantized {
        /// The amount.
        amount: Decimal,
        /// Requested decimal places.
        quantization: u32,
    },

    /// Division into zero parts.
    #[error("Cannot divide by zero.")]
    ZeroDivisor,

    // ========== Preview Errors ==========
    /// The inputs are not ready for a preview (no plan, no pricing,
    /// non-numeric price).
    #[error("Preview unavailable: {0}")]
    PreviewUnavailable(String),

    /// The pricing schedule holds a malformed value.
    #[error("Invalid pricing value for {field}: '{value}'")]
    InvalidPricing {
        /// Schedule field.
        field: String,
        /// The offending text.
        value: String,
    },
}

impl ReckonError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDecimal { .. } => "INVALID_DECIMAL",
            Self::DuplicateLineId(_) => "DUPLICATE_LINE_ID",
            Self::CascadeUnderAbovePriority { .. } => "CASCADE_UNDER_ABOVE_PRIORITY",
            Self::InvalidQuantization { .. } => "INVALID_QUANTIZATION",
            Self::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            Self::Overflow(_) => "OVERFLOW",
            Self::NothingToReconcile { .. } => "NOTHING_TO_RECONCILE",
            Self::ImproperlyQuantized { .. } => "IMPROPERLY_QUANTIZED",
            Self::ZeroDivisor => "ZERO_DIVISOR",
            Self::PreviewUnavailable(_) => "PREVIEW_UNAVAILABLE",
            Self::InvalidPricing { .. } => "INVALID_PRICING",
        }
    }

    /// Returns true if the error comes from the caller's input rather than
    /// from arithmetic limits.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDecimal { .. }
                | Self::DuplicateLineId(_)
                | Self::CascadeUnderAbovePriority { .. }
                | Self::InvalidQuantization { .. }
                | Self::ImproperlyQuantized { .. }
                | Self::ZeroDivisor
                | Self::PreviewUnavailable(_)
                | Self::InvalidPricing { .. }
        )
    }

    pub(crate) fn invalid_decimal(
        field: impl Into<String>,
        value: &str,
        err: &rust_decimal::Error,
    ) -> Self {
        Self::InvalidDecimal {
            field: field.into(),
            value: value.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<ReckonError> for AppError {
    fn from(err: ReckonError) -> Self {
        Self::Calculation(format!("[{}] {err}", err.error_code()))
    }
}
