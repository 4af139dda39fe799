//! Agent motion, nearest-waypoint assignment and RRT route planning for the
//! office floor plan.

pub mod agent;
pub mod crowd;
pub mod error;
pub mod rrt;
pub mod waypoints;

pub use agent::{Agent, MIN_SPEED};
pub use crowd::{Crowd, PlanSummary};
pub use error::NavigationError;
pub use rrt::{PlanOutcome, RrtConfig, RrtPlanner};
pub use waypoints::{Waypoints, assign_nearest, nearest_waypoint};

pub use officemap_geometry::{ClipRegion, Point};

/// Advances every agent by one simulation step.
pub fn tick(agents: &mut [Agent]) {
    for agent in agents.iter_mut() {
        agent.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_each_agent_once() {
        let mut agents = vec![
            Agent::with_destination(Point::ORIGIN, Point::new(0.0, 3.0), 1.0).unwrap(),
            Agent::new(Point::new(4.0, 4.0), 1.0).unwrap(),
        ];

        tick(&mut agents);
        assert_eq!(agents[0].position(), Point::new(0.0, 1.0));
        assert_eq!(agents[1].position(), Point::new(4.0, 4.0));

        tick(&mut agents);
        tick(&mut agents);
        assert_eq!(agents[0].position(), Point::new(0.0, 3.0));
        assert!(!agents[0].has_destination());
    }
}
