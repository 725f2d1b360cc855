//! Alias tables that resolve user-facing names to canonical identifiers and labels.

pub mod gamepad;
pub mod keyboard;
