//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the scene core:
//! - Math types and operations
//! - Arena handle types
//! - Frame time management
//! - Logging utilities
//! - Seeded procedural noise

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
pub mod noise;
