//! Point agents that walk toward a destination at a capped speed.

use core::fmt;

use officemap_geometry::{Point, distance};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::NavigationError;

/// Lowest speed an agent can be slowed down to.
pub const MIN_SPEED: f32 = 0.1;

/// A moving point with a position, an optional destination and a per-tick speed.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Point,
    destination: Point,
    /// Maximum distance covered by one tick.
    speed: f32,
    has_destination: bool,
    /// Entry point picked by the last entry assignment, if the agent is heading to one.
    entry_index: Option<usize>,
}

impl Agent {
    /// Creates an idle agent at `position`.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::InvalidSpeed)` if `speed` is not a positive finite number.
    pub fn new(position: Point, speed: f32) -> Result<Self, NavigationError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(NavigationError::InvalidSpeed("must be positive and finite"));
        }
        Ok(Agent {
            position,
            destination: position,
            speed,
            has_destination: false,
            entry_index: None,
        })
    }

    /// Creates an agent at `position` already walking toward `destination`.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::InvalidSpeed)` if `speed` is not a positive finite number.
    pub fn with_destination(
        position: Point,
        destination: Point,
        speed: f32,
    ) -> Result<Self, NavigationError> {
        let mut agent = Agent::new(position, speed)?;
        agent.set_destination(destination);
        Ok(agent)
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Last assigned destination. Only meaningful while [`Agent::has_destination`] is true.
    pub fn destination(&self) -> Point {
        self.destination
    }

    /// The destination the agent is walking to, if any.
    pub fn target(&self) -> Option<Point> {
        self.has_destination.then_some(self.destination)
    }

    /// Maximum distance covered per tick.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// `true` while the agent is walking toward its destination.
    pub fn has_destination(&self) -> bool {
        self.has_destination
    }

    /// Index of the entry point the agent was routed to, if any.
    pub fn entry_index(&self) -> Option<usize> {
        self.entry_index
    }

    /// Remaining distance to the destination, `None` when idle.
    pub fn distance_to_destination(&self) -> Option<f32> {
        self.target().map(|d| distance(self.position, d))
    }

    /// Sends the agent toward `destination`. No reachability check is made.
    pub fn set_destination(&mut self, destination: Point) {
        self.destination = destination;
        self.has_destination = true;
        self.entry_index = None;
    }

    /// Sends the agent toward entry point `index` located at `entry`.
    pub fn route_to_entry(&mut self, index: usize, entry: Point) {
        self.set_destination(entry);
        self.entry_index = Some(index);
    }

    /// Changes the speed by `delta`, never going below [`MIN_SPEED`].
    ///
    /// # Returns
    ///
    /// The new speed.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.speed = (self.speed + delta).max(MIN_SPEED);
        self.speed
    }

    /// Advances the agent by one tick.
    ///
    /// Moves `speed` units along the straight line to the destination, or
    /// snaps onto the destination and goes idle once it is within reach.
    pub fn advance(&mut self) {
        if !self.has_destination {
            return;
        }

        let remaining = distance(self.position, self.destination);
        if remaining > self.speed {
            self.position = self.position.step_toward(self.destination, self.speed);
        } else {
            self.position = self.destination;
            self.has_destination = false;
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target() {
            Some(d) => write!(f, "{} -> {} @ {:.1}", self.position, d, self.speed),
            None => write!(f, "{} (idle) @ {:.1}", self.position, self.speed),
        }
    }
}
