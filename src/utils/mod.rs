//! Shared helpers for validation and identifier handling.

pub mod validation;
