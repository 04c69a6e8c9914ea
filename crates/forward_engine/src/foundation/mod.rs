//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the renderer:
//! - Math types and homogeneous transform helpers
//! - Logging setup

pub mod logging;
pub mod math;
