//! celes-util - Shared utilities for the celes toolchain.
//!
//! This crate provides the infrastructure the rest of the workspace leans
//! on: positioned diagnostics with a renderable error list, and UTF-8 file
//! reading with byte-order-mark handling.

pub mod diagnostic;
pub mod fs;

pub use diagnostic::{Diagnostic, Diagnostics, Level};
pub use fs::read_utf8_file;
