// src/errors/mod.rs

//! Unified error handling module

pub mod unified;

pub use unified::{ErrorContext, VgaError, VgaResult};
