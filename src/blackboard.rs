use parking_lot::RwLock;
use std::sync::Arc;

use officemap_navigation::{Agent, Crowd};

/// Everything the simulation owns. Written by the simulation thread and the
/// command task, read by the renderer.
#[derive(Debug)]
pub struct SimState {
    pub crowd: Crowd,
    /// Agent set restored by a reset.
    pub defaults: Vec<Agent>,
    /// Template for agents added at runtime.
    pub spawn: Agent,
    pub animate: bool,
    pub ticks: u64,
    /// Result of the last command, shown in the HUD.
    pub status: String,
    pub shutdown: bool,
}

impl SimState {
    pub fn new(crowd: Crowd, defaults: Vec<Agent>, spawn: Agent, animate: bool) -> Self {
        SimState {
            crowd,
            defaults,
            spawn,
            animate,
            ticks: 0,
            status: String::new(),
            shutdown: false,
        }
    }
}

/// What the renderer needs for one frame.
#[derive(Clone, Debug, Default)]
pub struct View {
    pub agents: Vec<Agent>,
    pub moving: usize,
    pub animate: bool,
    pub ticks: u64,
    pub status: String,
}

pub type Blackboard = Arc<RwLock<SimState>>;

pub fn snapshot(bb: &Blackboard) -> View {
    let g = bb.read();
    View {
        agents: g.crowd.agents().to_vec(),
        moving: g.crowd.moving_count(),
        animate: g.animate,
        ticks: g.ticks,
        status: g.status.clone(),
    }
}

pub fn request_shutdown(bb: &Blackboard) {
    bb.write().shutdown = true;
}

pub fn is_shutdown(bb: &Blackboard) -> bool {
    bb.read().shutdown
}
