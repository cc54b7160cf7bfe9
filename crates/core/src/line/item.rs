//! The line item record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::codes::{Account, Category, LineType};

/// One priced entry on an invoice.
///
/// Amounts travel as fixed-point decimal strings so that every consumer parses
/// exactly the digits the producer wrote. The engine validates them when it
/// reckons; a malformed string is an error there, never here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique within one reckoning call. Negative ids mark synthetic lines.
    pub id: i32,
    /// What the line is for.
    #[serde(rename = "type")]
    pub kind: LineType,
    /// Lower priorities resolve first; equal priorities are peers.
    pub priority: i16,
    /// Flat amount.
    #[serde(default = "zero_string")]
    pub amount: String,
    /// Percentage of the lower-priority total, in percent (`"8.25"` is 8.25%).
    #[serde(default = "zero_string")]
    pub percentage: String,
    /// Take the flat amount out of lower-priority lines instead of adding it.
    #[serde(default)]
    pub cascade_amount: bool,
    /// Take the percentage out of lower-priority lines instead of adding it.
    #[serde(default)]
    pub cascade_percentage: bool,
    /// Size the percentage so that it is that share of the resulting total.
    #[serde(default)]
    pub back_into_percentage: bool,
    /// Previously committed value. Overrides every computed field.
    #[serde(default)]
    pub frozen_value: Option<String>,
    /// Label shown on the invoice.
    #[serde(default)]
    pub description: String,
    /// Where the money settles.
    #[serde(default)]
    pub destination_account: Option<Account>,
    /// Whose account it settles in. `None` means the platform.
    #[serde(default)]
    pub destination_user: Option<i64>,
    /// Exclusive upper priority bound of the lines that absorb this line's
    /// cascaded value. Must not exceed `priority`.
    #[serde(default)]
    pub cascade_under: Option<i16>,
    /// Bookkeeping category.
    #[serde(default)]
    pub category: Option<Category>,
}

fn zero_string() -> String {
    "0".to_string()
}

impl LineItem {
    /// Creates a zero-valued, non-cascading line.
    #[must_use]
    pub fn new(id: i32, kind: LineType, priority: i16) -> Self {
        Self {
            id,
            kind,
            priority,
            amount: zero_string(),
            percentage: zero_string(),
            cascade_amount: false,
            cascade_percentage: false,
            back_into_percentage: false,
            frozen_value: None,
            description: String::new(),
            destination_account: None,
            destination_user: None,
            cascade_under: None,
            category: None,
        }
    }

    /// Sets the flat amount.
    #[must_use]
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Sets the percentage.
    #[must_use]
    pub fn with_percentage(mut self, percentage: impl Into<String>) -> Self {
        self.percentage = percentage.into();
        self
    }

    /// Sets both cascade flags.
    #[must_use]
    pub fn cascading(mut self, cascade: bool) -> Self {
        self.cascade_amount = cascade;
        self.cascade_percentage = cascade;
        self
    }

    /// Sets the back-into flag.
    #[must_use]
    pub fn backing_into(mut self, back_into: bool) -> Self {
        self.back_into_percentage = back_into;
        self
    }

    /// Freezes the line at a committed value.
    #[must_use]
    pub fn frozen_at(mut self, value: impl Into<String>) -> Self {
        self.frozen_value = Some(value.into());
        self
    }

    /// Restricts which lines absorb this line's cascaded value.
    #[must_use]
    pub fn cascading_under(mut self, priority: i16) -> Self {
        self.cascade_under = Some(priority);
        self
    }

    /// Sets the routing metadata.
    #[must_use]
    pub fn routed_to(mut self, account: Account, user: Option<i64>) -> Self {
        self.destination_account = Some(account);
        self.destination_user = user;
        self
    }

    /// Sets the bookkeeping category.
    #[must_use]
    pub fn categorized(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns true if the line carries a committed value.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen_value.is_some()
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (priority {}): amount {}, percentage {}%",
            self.id, self.kind, self.priority, self.amount, self.percentage
        )
    }
}
