#![warn(missing_docs)]

//! Error types for the geometry library.
//!
//! This module defines error types that can occur when constructing
//! geometric primitives.

use core::fmt;

/// Errors that can occur when building geometric primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Error for an invalid clip region.
    /// This variant is returned when a region's bounds are inverted, empty or not finite.
    InvalidRegion(&'static str),
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidRegion(msg) => write!(f, "Invalid clip region: {}", msg),
        }
    }
}

impl core::error::Error for GeometryError {}
