use officemap_geometry::Point;
use officemap_navigation::NavigationError;

use crate::blackboard::SimState;
use crate::layout::PRESET_DESTINATIONS;

/// Operations the user can trigger on the running simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ToggleAnimation,
    /// RRT search toward the nearest reachable entry, for idle agents only.
    PlanRoutes,
    AssignNearestEntries,
    AssignNearestExits,
    SetDestination { index: usize, destination: Point },
    AdjustSpeed(f32),
    Reset,
    Clear,
    AddAgent,
}

/// Maps a typed character to its command. Case matters: `s` plans with the
/// RRT, `S` assigns the nearest entry directly.
pub fn command_for_key(key: char, speed_step: f32) -> Option<Command> {
    let command = match key {
        ' ' => Command::ToggleAnimation,
        's' => Command::PlanRoutes,
        'S' => Command::AssignNearestEntries,
        'd' | 'D' => Command::AssignNearestExits,
        '1' | '2' | '3' => {
            let index = key as usize - '1' as usize;
            Command::SetDestination { index, destination: PRESET_DESTINATIONS[index] }
        }
        '+' | '=' => Command::AdjustSpeed(speed_step),
        '-' => Command::AdjustSpeed(-speed_step),
        'r' | 'R' => Command::Reset,
        'c' | 'C' => Command::Clear,
        'a' | 'A' => Command::AddAgent,
        _ => return None,
    };
    Some(command)
}

/// Applies `command` to the simulation.
///
/// # Returns
///
/// A short status line for the HUD.
pub fn apply(state: &mut SimState, command: &Command) -> Result<String, NavigationError> {
    let status = match command {
        Command::ToggleAnimation => {
            state.animate = !state.animate;
            if state.animate { "Animation resumed" } else { "Animation paused" }.to_string()
        }
        Command::PlanRoutes => {
            let summary = state.crowd.plan_routes()?;
            format!(
                "RRT: {} routed, {} unreached, {} already moving",
                summary.reached, summary.exhausted, summary.skipped
            )
        }
        Command::AssignNearestEntries => {
            let n = state.crowd.assign_nearest_entries()?;
            format!("{} agents heading to the nearest entry", n)
        }
        Command::AssignNearestExits => {
            let n = state.crowd.assign_nearest_exits()?;
            format!("{} agents heading to the nearest exit", n)
        }
        Command::SetDestination { index, destination } => {
            state.crowd.set_destination(*index, *destination)?;
            format!("Agent {} heading to {}", index, destination)
        }
        Command::AdjustSpeed(delta) => {
            state.crowd.adjust_speed(*delta);
            format!("Speed adjusted by {:+.1}", delta)
        }
        Command::Reset => {
            state.crowd.reset(&state.defaults);
            format!("Reset to {} default agents", state.crowd.len())
        }
        Command::Clear => {
            state.crowd.clear();
            "All agents cleared".to_string()
        }
        Command::AddAgent => {
            state.crowd.add_agent(state.spawn.clone());
            format!("Agent added ({} total)", state.crowd.len())
        }
    };
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use officemap_geometry::ClipRegion;
    use officemap_navigation::{Crowd, RrtConfig, RrtPlanner};

    fn state() -> SimState {
        let plan = layout::office();
        let defaults = layout::default_agents().unwrap();
        let crowd = Crowd::new(
            defaults.clone(),
            plan.waypoints().unwrap(),
            ClipRegion::new(-750.0, 550.0, -550.0, 600.0).unwrap(),
            RrtPlanner::new(RrtConfig::default()).unwrap(),
            Some(5),
        );
        SimState::new(crowd, defaults, layout::spawn_agent().unwrap(), true)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(' ', 0.1), Some(Command::ToggleAnimation));
        assert_eq!(command_for_key('s', 0.1), Some(Command::PlanRoutes));
        assert_eq!(command_for_key('S', 0.1), Some(Command::AssignNearestEntries));
        assert_eq!(command_for_key('d', 0.1), Some(Command::AssignNearestExits));
        assert_eq!(
            command_for_key('2', 0.1),
            Some(Command::SetDestination { index: 1, destination: Point::new(-100.0, -100.0) })
        );
        assert_eq!(command_for_key('+', 0.25), Some(Command::AdjustSpeed(0.25)));
        assert_eq!(command_for_key('-', 0.25), Some(Command::AdjustSpeed(-0.25)));
        assert_eq!(command_for_key('r', 0.1), Some(Command::Reset));
        assert_eq!(command_for_key('c', 0.1), Some(Command::Clear));
        assert_eq!(command_for_key('a', 0.1), Some(Command::AddAgent));
        assert_eq!(command_for_key('x', 0.1), None);
    }

    #[test]
    fn test_toggle_animation() {
        let mut state = state();
        apply(&mut state, &Command::ToggleAnimation).unwrap();
        assert!(!state.animate);
        apply(&mut state, &Command::ToggleAnimation).unwrap();
        assert!(state.animate);
    }

    #[test]
    fn test_clear_add_reset() {
        let mut state = state();
        apply(&mut state, &Command::Clear).unwrap();
        assert!(state.crowd.is_empty());

        apply(&mut state, &Command::AddAgent).unwrap();
        assert_eq!(state.crowd.agents(), &[layout::spawn_agent().unwrap()]);

        apply(&mut state, &Command::Reset).unwrap();
        assert_eq!(state.crowd.agents(), state.defaults.as_slice());
    }

    #[test]
    fn test_set_destination_out_of_range() {
        let mut state = state();
        apply(&mut state, &Command::Clear).unwrap();
        let err = apply(&mut state, &command_for_key('1', 0.1).unwrap()).unwrap_err();
        assert_eq!(err, NavigationError::AgentIndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_plan_routes_only_touches_idle_agents() {
        let mut state = state();
        let before = state.crowd.agents().to_vec();
        let status = apply(&mut state, &Command::PlanRoutes).unwrap();
        // Every default agent is already walking somewhere.
        assert_eq!(state.crowd.agents(), before.as_slice());
        assert!(status.contains("8 already moving"));
    }

    #[test]
    fn test_exits_then_entries() {
        let mut state = state();
        apply(&mut state, &Command::AssignNearestExits).unwrap();
        assert!(state.crowd.agents().iter().all(|a| a.entry_index().is_none()));
        apply(&mut state, &Command::AssignNearestEntries).unwrap();
        assert!(state.crowd.agents().iter().all(|a| a.entry_index().is_some()));
    }
}
