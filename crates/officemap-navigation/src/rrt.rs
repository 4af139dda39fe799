/*

Single-query RRT (rapidly-exploring random tree), unobstructed plane:

Initialize:
    - tree = [start]

Loop (at most max_iterations):
    - sample q_rand uniformly in the bounds (or an entry point, with probability goal_sample_rate)
    - q_near = tree node closest to q_rand
    - q_new = step from q_near toward q_rand by at most step_size
    - append q_new to the tree
    - if q_new is within goal_threshold of an entry point, route the agent there and stop

The tree is thrown away when the call returns.

*/

use officemap_geometry::{ClipRegion, Point, distance};
use rand::Rng;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::NavigationError;
use crate::waypoints::nearest_waypoint;

/// Tuning parameters of the RRT planner.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrtConfig {
    /// Number of tree extensions before giving up.
    pub max_iterations: usize,
    /// Longest edge added to the tree.
    pub step_size: f32,
    /// A new node closer than this to an entry point reaches it.
    pub goal_threshold: f32,
    /// Probability of sampling an entry point instead of a uniform point.
    pub goal_sample_rate: f32,
}

impl Default for RrtConfig {
    fn default() -> Self {
        RrtConfig {
            max_iterations: 1000,
            step_size: 20.0,
            goal_threshold: 30.0,
            goal_sample_rate: 0.0,
        }
    }
}

impl RrtConfig {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::InvalidPlannerConfig)` describing the first bad parameter.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(NavigationError::InvalidPlannerConfig("step size must be positive"));
        }
        if !self.goal_threshold.is_finite() || self.goal_threshold <= 0.0 {
            return Err(NavigationError::InvalidPlannerConfig("goal threshold must be positive"));
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(NavigationError::InvalidPlannerConfig(
                "goal sample rate must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Result of one planning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanOutcome {
    /// The agent already had a destination and was left alone.
    AlreadyRouted,
    /// A tree node came within the goal radius of an entry point.
    Reached {
        /// Index of the entry point the agent now walks to.
        entry_index: usize,
        /// Position of that entry point.
        entry: Point,
        /// Extensions performed, including the successful one.
        iterations: usize,
        /// Number of nodes in the tree, root included.
        tree_size: usize,
    },
    /// No entry point was reached within the iteration budget.
    Exhausted {
        /// Extensions performed.
        iterations: usize,
        /// Number of nodes in the tree, root included.
        tree_size: usize,
    },
}

impl PlanOutcome {
    /// `true` if the planner assigned a new destination.
    pub fn is_reached(&self) -> bool {
        matches!(self, PlanOutcome::Reached { .. })
    }
}

/// Single-query RRT planner routing an agent to the first entry point its tree reaches.
#[derive(Debug, Clone, PartialEq)]
pub struct RrtPlanner {
    config: RrtConfig,
}

impl RrtPlanner {
    /// Creates a planner.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::InvalidPlannerConfig)` if `config` does not validate.
    pub fn new(config: RrtConfig) -> Result<Self, NavigationError> {
        config.validate()?;
        Ok(RrtPlanner { config })
    }

    /// The planner's parameters.
    pub fn config(&self) -> &RrtConfig {
        &self.config
    }

    /// Grows a tree from the agent's position until a node lands near an entry point.
    ///
    /// On success the agent is routed to that entry point. An agent that
    /// already has a destination is never replanned. Running out of
    /// iterations leaves the agent untouched.
    ///
    /// # Arguments
    ///
    /// * `agent` - The agent to route.
    /// * `bounds` - Region random samples are drawn from.
    /// * `entry_points` - Candidate goals, checked in order.
    /// * `rng` - Random source; pass a seeded generator for reproducible plans.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::NoWaypoints)` if `entry_points` is empty.
    pub fn plan_route<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        bounds: &ClipRegion,
        entry_points: &[Point],
        rng: &mut R,
    ) -> Result<PlanOutcome, NavigationError> {
        if agent.has_destination() {
            return Ok(PlanOutcome::AlreadyRouted);
        }
        if entry_points.is_empty() {
            return Err(NavigationError::NoWaypoints("route planning needs entry points"));
        }

        let mut tree: Vec<Point> = vec![agent.position()];

        for iteration in 1..=self.config.max_iterations {
            let sample = self.sample(bounds, entry_points, rng);
            let (_, nearest) = nearest_waypoint(sample, &tree)?;
            let node = nearest.step_toward(sample, self.config.step_size);
            tree.push(node);

            let reached = entry_points
                .iter()
                .position(|&entry| distance(node, entry) < self.config.goal_threshold);

            if let Some(entry_index) = reached {
                let entry = entry_points[entry_index];
                agent.route_to_entry(entry_index, entry);
                debug!(entry_index, %entry, iteration, tree_size = tree.len(), "RRT reached entry point");
                return Ok(PlanOutcome::Reached {
                    entry_index,
                    entry,
                    iterations: iteration,
                    tree_size: tree.len(),
                });
            }
        }

        debug!(start = %agent.position(), tree_size = tree.len(), "RRT exhausted without reaching an entry point");
        Ok(PlanOutcome::Exhausted {
            iterations: self.config.max_iterations,
            tree_size: tree.len(),
        })
    }

    fn sample<R: Rng + ?Sized>(&self, bounds: &ClipRegion, entry_points: &[Point], rng: &mut R) -> Point {
        if self.config.goal_sample_rate > 0.0
            && rng.random_bool(f64::from(self.config.goal_sample_rate))
        {
            return entry_points[rng.random_range(0..entry_points.len())];
        }

        Point::new(
            rng.random_range(bounds.left()..bounds.right()),
            rng.random_range(bounds.bottom()..bounds.top()),
        )
    }
}
