//! Fixed points of interest and nearest-waypoint assignment.

use officemap_geometry::{Point, distance};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::agent::Agent;
use crate::error::NavigationError;

/// The two waypoint sets of a floor plan: exit doors and room entry points.
///
/// Both sets are ordered; ties in nearest-waypoint queries go to the earlier entry.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoints {
    exits: Vec<Point>,
    entries: Vec<Point>,
}

impl Waypoints {
    /// Creates the waypoint sets.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::NoWaypoints)` if either set is empty.
    pub fn new(exits: Vec<Point>, entries: Vec<Point>) -> Result<Self, NavigationError> {
        if exits.is_empty() {
            return Err(NavigationError::NoWaypoints("at least one exit door is required"));
        }
        if entries.is_empty() {
            return Err(NavigationError::NoWaypoints("at least one entry point is required"));
        }
        Ok(Waypoints { exits, entries })
    }

    /// Exit doors, in declaration order.
    pub fn exits(&self) -> &[Point] {
        &self.exits
    }

    /// Room entry points, in declaration order.
    pub fn entries(&self) -> &[Point] {
        &self.entries
    }
}

/// Finds the candidate closest to `from`.
///
/// Uses a strict `<` comparison, so the earliest of several equally close
/// candidates wins.
///
/// # Errors
///
/// Returns `Err(NavigationError::NoWaypoints)` if `candidates` is empty.
pub fn nearest_waypoint(from: Point, candidates: &[Point]) -> Result<(usize, Point), NavigationError> {
    let mut best: Option<(usize, Point, f32)> = None;

    for (index, &candidate) in candidates.iter().enumerate() {
        let d = distance(from, candidate);
        match best {
            Some((_, _, best_distance)) if d >= best_distance => {}
            _ => best = Some((index, candidate, d)),
        }
    }

    best.map(|(index, point, _)| (index, point))
        .ok_or(NavigationError::NoWaypoints("no candidates to choose from"))
}

/// Sends `agent` to the candidate nearest to its current position.
///
/// # Returns
///
/// The index of the chosen candidate.
///
/// # Errors
///
/// Returns `Err(NavigationError::NoWaypoints)` if `candidates` is empty; the
/// agent is left untouched.
pub fn assign_nearest(agent: &mut Agent, candidates: &[Point]) -> Result<usize, NavigationError> {
    let (index, point) = nearest_waypoint(agent.position(), candidates)?;
    agent.set_destination(point);
    Ok(index)
}
