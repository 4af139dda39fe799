use anyhow::{Context, ensure};
use officemap_navigation::{Crowd, RrtPlanner};
use spin_sleep::SpinSleeper;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::blackboard::{Blackboard, SimState, is_shutdown, snapshot};
use crate::command::{self, Command};
use crate::config::{Settings, SimulationSettings};
use crate::layout::{self, FloorPlan};

/// Builds the initial simulation state from the settings and floor plan.
pub fn build_state(settings: &Settings, plan: &FloorPlan) -> anyhow::Result<SimState> {
    let bounds = settings.clip.region().context("invalid [clip] region")?;
    let planner = RrtPlanner::new(settings.rrt).context("invalid [rrt] settings")?;
    let waypoints = plan.waypoints().context("floor plan has no waypoints")?;
    let defaults = layout::default_agents().context("invalid default agents")?;
    let spawn = layout::spawn_agent().context("invalid spawn agent")?;

    let crowd = Crowd::new(defaults.clone(), waypoints, bounds, planner, settings.simulation.seed);
    Ok(SimState::new(crowd, defaults, spawn, settings.simulation.animate))
}

/// Runs the simulation until shutdown is requested on the blackboard.
///
/// Agents advance on a dedicated thread at `tick_hz`; commands and the
/// periodic monitor run as async tasks.
pub async fn run(
    bb: Blackboard,
    command_rx: broadcast::Receiver<Arc<Command>>,
    settings: SimulationSettings,
) -> anyhow::Result<()> {
    ensure!(
        settings.tick_hz.is_finite() && settings.tick_hz > 0.0,
        "tick_hz must be positive, got {}",
        settings.tick_hz
    );
    let period = Duration::from_secs_f64(1.0 / settings.tick_hz);

    info!(tick_hz = settings.tick_hz, "Spawning simulation thread...");
    std::thread::Builder::new()
        .name("simulation".into())
        .spawn({
            let bb = Arc::clone(&bb);
            move || {
                info!("Simulation thread started.");
                let sleeper = SpinSleeper::new(10_000);
                loop {
                    {
                        let mut state = bb.write();
                        if state.shutdown {
                            break;
                        }
                        if state.animate {
                            state.crowd.tick();
                            state.ticks += 1;
                        }
                    }
                    sleeper.sleep(period);
                }
                info!("Simulation thread stopped.");
            }
        })?;

    tokio::try_join!(command_task(bb.clone(), command_rx), monitor(bb))?;
    info!("Simulation tasks finished.");
    Ok(())
}

async fn command_task(bb: Blackboard, mut command_rx: broadcast::Receiver<Arc<Command>>) -> anyhow::Result<()> {
    info!("Command task started.");
    loop {
        let command = match command_rx.recv().await {
            Ok(command) => command,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Command receiver lagged; commands dropped");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("Command channel closed.");
                return Ok(());
            }
        };

        let mut state = bb.write();
        match command::apply(&mut state, &command) {
            Ok(status) => {
                info!(?command, %status, "Command applied");
                state.status = status;
            }
            Err(e) => {
                warn!(?command, error = %e, "Command rejected");
                state.status = e.to_string();
            }
        }
    }
}

async fn monitor(bb: Blackboard) -> anyhow::Result<()> {
    info!("Monitor task started.");
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    let mut was_moving = true;
    loop {
        tick.tick().await;
        if is_shutdown(&bb) {
            info!("Shutdown requested; monitor stopping.");
            return Ok(());
        }

        let view = snapshot(&bb);
        debug!(agents = view.agents.len(), moving = view.moving, ticks = view.ticks, animate = view.animate, "Crowd status");
        let moving = view.moving > 0;
        if was_moving && !moving {
            info!(agents = view.agents.len(), "All agents idle");
        }
        was_moving = moving;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackboard::request_shutdown;
    use crate::bus::Topic;
    use parking_lot::RwLock;

    fn blackboard() -> Blackboard {
        let state = build_state(&Settings::default(), &layout::office()).unwrap();
        Arc::new(RwLock::new(state))
    }

    #[test]
    fn test_build_state_from_defaults() {
        let state = build_state(&Settings::default(), &layout::office()).unwrap();
        assert_eq!(state.crowd.len(), 8);
        assert_eq!(state.crowd.agents(), state.defaults.as_slice());
        assert!(state.animate);
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_build_state_rejects_bad_clip() {
        let mut settings = Settings::default();
        settings.clip.left = 1000.0;
        let err = build_state(&settings, &layout::office()).unwrap_err();
        assert!(err.to_string().contains("[clip]"));
    }

    #[tokio::test]
    async fn test_run_rejects_zero_rate() {
        let topic: Topic<Command> = Topic::new(4);
        let settings = SimulationSettings { tick_hz: 0.0, ..Default::default() };
        assert!(run(blackboard(), topic.subscribe(), settings).await.is_err());
    }

    #[tokio::test]
    async fn test_command_task_applies_and_stops_on_close() {
        let bb = blackboard();
        let topic: Topic<Command> = Topic::new(4);
        let rx = topic.subscribe();
        topic.publish(Command::Clear);
        topic.publish(Command::AddAgent);
        topic.publish(Command::SetDestination { index: 3, destination: layout::PRESET_DESTINATIONS[0] });
        drop(topic);

        command_task(bb.clone(), rx).await.unwrap();

        let state = bb.read();
        assert_eq!(state.crowd.len(), 1);
        // The out-of-range destination is reported, not fatal.
        assert!(state.status.contains("out of range"), "status was {:?}", state.status);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let bb = blackboard();
        let topic: Topic<Command> = Topic::new(4);
        let rx = topic.subscribe();
        request_shutdown(&bb);
        drop(topic);
        run(bb.clone(), rx, SimulationSettings::default()).await.unwrap();
        assert_eq!(bb.read().ticks, 0);
    }
}
