use macroquad::prelude::*;
use officemap_geometry::{ClipRegion, Point};
use std::sync::Arc;
use tracing::{debug, info};

use crate::blackboard::{Blackboard, View, snapshot};
use crate::bus::Topic;
use crate::command::{Command, command_for_key};
use crate::config::window_settings;
use crate::layout::{FloorPlan, FurnitureKind, Rect};

/// The window shows world coordinates in `[-WORLD_HALF_EXTENT, WORLD_HALF_EXTENT]` on both axes.
const WORLD_HALF_EXTENT: f32 = 800.0;
const AGENT_RADIUS: f32 = 5.0;
const LABEL_SIZE: f32 = 16.0;
const HUD_SIZE: f32 = 18.0;

const WALL_COLOR: Color = Color::new(0.1, 0.5, 0.7, 1.0);
const ROOM_COLOR: Color = Color::new(0.1, 0.5, 0.7, 0.25);
const TABLE_COLOR: Color = Color::new(0.5, 0.5, 0.5, 1.0);
const CHAIR_COLOR: Color = Color::new(0.2, 0.2, 0.2, 1.0);
const AGENT_COLOR: Color = Color::new(0.5, 0.0, 0.5, 1.0);

pub fn window_conf() -> Conf {
    let window = window_settings();
    Conf {
        window_title: window.title,
        window_width: window.width,
        window_height: window.height,
        high_dpi: true,
        ..Default::default()
    }
}

/// Maps world coordinates (y up) to pixels (y down) for a `width` x `height` screen.
fn world_to_screen(p: Point, width: f32, height: f32) -> Vec2 {
    let span = 2.0 * WORLD_HALF_EXTENT;
    vec2(
        (p.x + WORLD_HALF_EXTENT) / span * width,
        (WORLD_HALF_EXTENT - p.y) / span * height,
    )
}

fn screen_to_world(s: Vec2, width: f32, height: f32) -> Point {
    let span = 2.0 * WORLD_HALF_EXTENT;
    Point::new(s.x / width * span - WORLD_HALF_EXTENT, WORLD_HALF_EXTENT - s.y / height * span)
}

fn to_screen(p: Point) -> Vec2 {
    world_to_screen(p, screen_width(), screen_height())
}

fn draw_rect(r: &Rect, filled: bool, color: Color) {
    let top_left = to_screen(Point::new(r.min.x, r.max.y));
    let bottom_right = to_screen(Point::new(r.max.x, r.min.y));
    let size = bottom_right - top_left;
    if filled {
        draw_rectangle(top_left.x, top_left.y, size.x, size.y, color);
    } else {
        draw_rectangle_lines(top_left.x, top_left.y, size.x, size.y, 1.0, color);
    }
}

fn draw_marker(p: Point, color: Color) {
    let s = to_screen(p);
    draw_rectangle(s.x - 3.0, s.y - 3.0, 6.0, 6.0, color);
}

fn draw_floor_plan(plan: &FloorPlan, region: &ClipRegion) {
    for wall in &plan.walls {
        if let Some(visible) = region.clip_segment(wall.start, wall.end) {
            let a = to_screen(visible.start);
            let b = to_screen(visible.end);
            draw_line(a.x, a.y, b.x, b.y, 2.0, WALL_COLOR);
        }
    }

    for room in &plan.rooms {
        draw_rect(&room.bounds.inset(1.0), true, ROOM_COLOR);
        draw_rect(&room.bounds, false, WALL_COLOR);
    }

    for item in &plan.furniture {
        let color = match item.kind {
            FurnitureKind::Table => TABLE_COLOR,
            FurnitureKind::Chair => CHAIR_COLOR,
        };
        draw_rect(&item.bounds, true, color);
    }

    for entry in &plan.entries {
        draw_marker(*entry, GREEN);
    }
    for exit in &plan.exits {
        draw_marker(*exit, RED);
    }

    for room in &plan.rooms {
        let s = to_screen(room.label);
        draw_text(room.name, s.x, s.y, LABEL_SIZE, WHITE);
    }
}

fn draw_hud(view: &View, plan: &FloorPlan) {
    let mouse = screen_to_world(mouse_position().into(), screen_width(), screen_height());
    let room = plan.room_at(mouse).map_or("corridor", |r| r.name);

    let lines = [
        format!(
            "Agents: {}  moving: {}  ticks: {}{}",
            view.agents.len(),
            view.moving,
            view.ticks,
            if view.animate { "" } else { "  [paused]" }
        ),
        format!("Cursor: {} {}", mouse, room),
        view.status.clone(),
        "D exits  Shift+S entries  S plan  1-3 presets  +/- speed".to_string(),
        "R reset  C clear  A add  Space pause  Esc/Q quit".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 20.0 + i as f32 * (HUD_SIZE + 2.0), HUD_SIZE, WHITE);
    }
}

/// Renders the office and the crowd every frame and turns key presses into
/// commands, until the user quits.
pub async fn run_visualization_loop(
    bb: Blackboard,
    plan: Arc<FloorPlan>,
    commands: Topic<Command>,
    region: ClipRegion,
    speed_step: f32,
) {
    info!("Visualization loop starting...");

    'frames: loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        while let Some(key) = get_char_pressed() {
            if key == 'q' || key == 'Q' {
                break 'frames;
            }
            if let Some(command) = command_for_key(key, speed_step) {
                debug!(%key, ?command, "Key pressed");
                commands.publish(command);
            }
        }

        let view = snapshot(&bb);

        clear_background(BLACK);
        draw_floor_plan(&plan, &region);
        for agent in &view.agents {
            let s = to_screen(agent.position());
            draw_circle(s.x, s.y, AGENT_RADIUS, AGENT_COLOR);
            if let Some(index) = agent.entry_index() {
                draw_text(&index.to_string(), s.x + AGENT_RADIUS, s.y - AGENT_RADIUS, 14.0, WHITE);
            }
        }
        draw_hud(&view, &plan);

        next_frame().await
    }

    info!("Visualization loop exited.");
}
