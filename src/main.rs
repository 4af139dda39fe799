mod blackboard; // shared simulation state
mod bus; // broadcast topics
mod command; // key bindings and command dispatch
mod config; // settings from config/default.toml and OFFICEMAP__* env vars
mod graphics; // macroquad renderer
mod layout; // the office floor plan
mod simulation; // tick thread and async tasks

use blackboard::{Blackboard, request_shutdown};
use bus::Topic;
use command::Command;
use graphics::window_conf;

use parking_lot::RwLock;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Office layout visualizer started.");

    let settings = config::load_settings().unwrap_or_else(|e| {
        error!("Falling back to default settings: {}", e);
        config::Settings::default()
    });

    let plan = Arc::new(layout::office());
    let state = match simulation::build_state(&settings, &plan) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to set up the simulation: {:#}", e);
            return;
        }
    };
    let region = *state.crowd.bounds();
    let bb: Blackboard = Arc::new(RwLock::new(state));

    let command_topic: Topic<Command> = Topic::new(32);
    let command_rx = command_topic.subscribe();

    let tokio_rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start the Tokio runtime: {}", e);
            return;
        }
    };

    tokio_rt.spawn({
        let bb = Arc::clone(&bb);
        let simulation_settings = settings.simulation.clone();
        async move {
            info!("Simulation task started.");
            match simulation::run(bb, command_rx, simulation_settings).await {
                Ok(_) => info!("Simulation finished."),
                Err(e) => error!("Simulation failed: {:#}", e),
            }
        }
    });

    graphics::run_visualization_loop(
        Arc::clone(&bb),
        plan,
        command_topic,
        region,
        settings.simulation.speed_step,
    )
    .await;

    request_shutdown(&bb);
    tokio_rt.shutdown_timeout(Duration::from_millis(500));
    info!("Office layout visualizer stopped.");
}
