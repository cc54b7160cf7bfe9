//! Common types used across the workspace.

pub mod money;

pub use money::{
    DEFAULT_QUANTIZATION, MAX_QUANTIZATION, ROUNDING, is_quantized, money_string, parse_decimal,
    quantize, quantum, zero,
};
