//! UI components.

pub mod circuit_field;
