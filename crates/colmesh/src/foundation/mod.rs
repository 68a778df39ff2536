//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types, transform builders and the engine axis convention
//! - Logging utilities

pub mod math;
pub mod logging;
