//! This module defines the error types used by the `officemap-navigation` crate.

#![warn(missing_docs)]

use officemap_geometry::GeometryError;

/// Error type for navigation operations.
///
/// This enum encapsulates all possible errors that can occur while moving
/// agents around, such as invalid speeds, empty waypoint sets or
/// out-of-range agent indices.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// Error for an invalid agent speed.
    /// This variant is returned when a speed is not a positive finite number.
    InvalidSpeed(&'static str),
    /// Error for an empty waypoint set.
    /// This variant is returned when a nearest-waypoint query or a route plan has no candidates.
    NoWaypoints(&'static str),
    /// Error for an agent index beyond the current number of agents.
    AgentIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of agents at the time of the request.
        len: usize,
    },
    /// Error for invalid planner parameters.
    /// This variant is returned when a step size, goal radius or goal bias is out of range.
    InvalidPlannerConfig(&'static str),
    /// Error raised by the geometry layer.
    Geometry(GeometryError),
}

impl core::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NavigationError::InvalidSpeed(msg) => write!(f, "Invalid agent speed: {}", msg),
            NavigationError::NoWaypoints(msg) => write!(f, "No waypoints available: {}", msg),
            NavigationError::AgentIndexOutOfRange { index, len } => {
                write!(f, "Agent index {} out of range for {} agents", index, len)
            }
            NavigationError::InvalidPlannerConfig(msg) => {
                write!(f, "Invalid planner configuration: {}", msg)
            }
            NavigationError::Geometry(e) => write!(f, "Geometry error: {}", e),
        }
    }
}

impl core::error::Error for NavigationError {}

impl From<GeometryError> for NavigationError {
    fn from(e: GeometryError) -> Self {
        NavigationError::Geometry(e)
    }
}
