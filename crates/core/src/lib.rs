//! Line-item reckoning for marketplace invoices.
//!
//! This crate contains pure calculation logic with ZERO I/O dependencies.
//! It never reads files, environment variables or arguments.
//!
//! # Modules
//!
//! - `line` - Line item records and their integer-coded enums
//! - `reckoning` - Priority-banded resolution of line items into totals
//! - `preview` - Synthesised line items for invoices that do not exist yet

pub mod line;
pub mod preview;
pub mod reckoning;

pub use line::{Account, Category, LineItem, LineType};
pub use reckoning::{Calculation, LineAccumulator, ReckonError};
