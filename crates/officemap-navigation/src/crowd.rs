//! The agent collection and the named operations that drive it.

use officemap_geometry::{ClipRegion, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::error::NavigationError;
use crate::rrt::{PlanOutcome, RrtPlanner};
use crate::tick;
use crate::waypoints::{Waypoints, assign_nearest, nearest_waypoint};

/// Tally of one [`Crowd::plan_routes`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Agents that received an entry point.
    pub reached: usize,
    /// Agents whose tree ran out of iterations.
    pub exhausted: usize,
    /// Agents skipped because they were already walking somewhere.
    pub skipped: usize,
}

/// All agents of a floor plan together with the waypoints, sampling bounds,
/// planner and random source they share.
#[derive(Debug, Clone)]
pub struct Crowd {
    agents: Vec<Agent>,
    waypoints: Waypoints,
    bounds: ClipRegion,
    planner: RrtPlanner,
    rng: StdRng,
}

impl Crowd {
    /// Creates a crowd.
    ///
    /// With `seed` set, route planning is reproducible; otherwise the random
    /// source is seeded from the operating system.
    pub fn new(
        agents: Vec<Agent>,
        waypoints: Waypoints,
        bounds: ClipRegion,
        planner: RrtPlanner,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(agents = agents.len(), ?seed, "Crowd created");
        Crowd { agents, waypoints, bounds, planner, rng }
    }

    /// The agents, in insertion order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// `true` if there are no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents currently walking toward a destination.
    pub fn moving_count(&self) -> usize {
        self.agents.iter().filter(|a| a.has_destination()).count()
    }

    /// Exit doors and entry points.
    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    /// Region random samples are drawn from.
    pub fn bounds(&self) -> &ClipRegion {
        &self.bounds
    }

    /// The route planner.
    pub fn planner(&self) -> &RrtPlanner {
        &self.planner
    }

    /// Advances every agent by one step.
    pub fn tick(&mut self) {
        tick(&mut self.agents);
    }

    /// Sends every agent to its nearest exit door.
    ///
    /// # Returns
    ///
    /// The number of agents assigned.
    pub fn assign_nearest_exits(&mut self) -> Result<usize, NavigationError> {
        for agent in &mut self.agents {
            let index = assign_nearest(agent, self.waypoints.exits())?;
            debug!(exit_index = index, %agent, "Assigned nearest exit");
        }
        Ok(self.agents.len())
    }

    /// Sends every agent to its nearest entry point by straight-line distance
    /// and records which entry was chosen.
    ///
    /// # Returns
    ///
    /// The number of agents assigned.
    pub fn assign_nearest_entries(&mut self) -> Result<usize, NavigationError> {
        for agent in &mut self.agents {
            let (index, entry) = nearest_waypoint(agent.position(), self.waypoints.entries())?;
            agent.route_to_entry(index, entry);
            debug!(entry_index = index, %agent, "Assigned nearest entry");
        }
        Ok(self.agents.len())
    }

    /// Runs the RRT planner for every agent that has no destination.
    pub fn plan_routes(&mut self) -> Result<PlanSummary, NavigationError> {
        let mut summary = PlanSummary::default();

        for agent in &mut self.agents {
            let outcome = self.planner.plan_route(
                agent,
                &self.bounds,
                self.waypoints.entries(),
                &mut self.rng,
            )?;
            match outcome {
                PlanOutcome::AlreadyRouted => summary.skipped += 1,
                PlanOutcome::Reached { .. } => summary.reached += 1,
                PlanOutcome::Exhausted { .. } => summary.exhausted += 1,
            }
        }

        debug!(?summary, "Route planning finished");
        Ok(summary)
    }

    /// Sends agent `index` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `Err(NavigationError::AgentIndexOutOfRange)` if there is no such agent.
    pub fn set_destination(&mut self, index: usize, destination: Point) -> Result<(), NavigationError> {
        let len = self.agents.len();
        let agent = self
            .agents
            .get_mut(index)
            .ok_or(NavigationError::AgentIndexOutOfRange { index, len })?;
        agent.set_destination(destination);
        debug!(index, %destination, "Destination set");
        Ok(())
    }

    /// Changes every agent's speed by `delta`, flooring at [`crate::MIN_SPEED`].
    pub fn adjust_speed(&mut self, delta: f32) {
        for agent in &mut self.agents {
            agent.adjust_speed(delta);
        }
        debug!(delta, agents = self.agents.len(), "Speed adjusted");
    }

    /// Replaces all agents with `defaults`.
    pub fn reset(&mut self, defaults: &[Agent]) {
        self.agents = defaults.to_vec();
        info!(agents = self.agents.len(), "Crowd reset to defaults");
    }

    /// Removes every agent.
    pub fn clear(&mut self) {
        self.agents.clear();
        info!("Crowd cleared");
    }

    /// Appends an agent.
    pub fn add_agent(&mut self, agent: Agent) {
        debug!(%agent, "Agent added");
        self.agents.push(agent);
    }
}
