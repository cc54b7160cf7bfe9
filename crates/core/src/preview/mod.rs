//! Invoice preview builder.
//!
//! Synthesises the line items a hypothetical invoice would carry so a
//! caller can reckon them before anything is saved. Synthetic lines use
//! negative ids:
//!
//! | Id  | Line                 | Priority |
//! |-----|----------------------|----------|
//! | -1  | base price           | 0        |
//! | -2  | add-on               | 100      |
//! | -3  | table service        | 400      |
//! | -4  | tax                  | 700      |
//! | -5  | shield               | 300      |
//! | -6  | deliverable tracking | 300      |
//! | -7  | card fee             | 350      |
//! | -8  | cross-border fee     | 325      |
//! | -9  | payout fee           | 325      |
//! | -10 | connect fee          | 325      |
//! | -11 | tip processing       | 300      |

mod builder;
mod context;
mod pricing;
mod rules;
mod tips;

#[cfg(test)]
mod tests;

pub use builder::{build_preview_lines, deliverable_lines, invoice_lines};
pub use context::{DeliverableLinesContext, PreviewConfig, TipLinesContext};
pub use pricing::{Pricing, ProcessorFees, Product, ServicePlan};
pub use rules::FEE_CASCADE_UNDER;
pub use tips::tip_fee_lines;
