//! Per-keystroke validation for the numeric input fields.

pub mod field;
