//! Line item records.
//!
//! A [`LineItem`] is plain data: the engine reads it, never mutates it, and
//! carries its routing fields through untouched.

mod codes;
mod item;

pub use codes::{Account, Category, LineType};
pub use item::LineItem;
