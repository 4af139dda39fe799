//! Fixed floor plan of the office: walls, rooms, furniture, waypoints and the
//! default cast of agents.

use officemap_geometry::{Point, Segment};
use officemap_navigation::{Agent, NavigationError, Waypoints};

/// Destinations bound to the `1`, `2` and `3` keys, for agents 0 to 2.
pub const PRESET_DESTINATIONS: [Point; 3] = [
    Point::new(100.0, 100.0),
    Point::new(-100.0, -100.0),
    Point::new(200.0, 200.0),
];

/// Axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Builds a rectangle from any two opposite corners.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Rect {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// The same rectangle shrunk by `margin` on every side.
    pub fn inset(&self, margin: f32) -> Rect {
        Rect::from_corners(
            self.min.x + margin,
            self.min.y + margin,
            self.max.x - margin,
            self.max.y - margin,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: &'static str,
    pub bounds: Rect,
    /// Where the room's name is drawn.
    pub label: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FurnitureKind {
    Table,
    Chair,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Furniture {
    pub kind: FurnitureKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    pub walls: Vec<Segment>,
    pub rooms: Vec<Room>,
    pub furniture: Vec<Furniture>,
    pub exits: Vec<Point>,
    pub entries: Vec<Point>,
}

impl FloorPlan {
    /// The room containing `p`, if any.
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|room| room.bounds.contains(p))
    }

    pub fn waypoints(&self) -> Result<Waypoints, NavigationError> {
        Waypoints::new(self.exits.clone(), self.entries.clone())
    }
}

fn wall(x1: f32, y1: f32, x2: f32, y2: f32) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

fn room(name: &'static str, corners: (f32, f32, f32, f32), label: (f32, f32)) -> Room {
    let (x1, y1, x2, y2) = corners;
    Room {
        name,
        bounds: Rect::from_corners(x1, y1, x2, y2),
        label: label.into(),
    }
}

fn table(x1: f32, y1: f32, x2: f32, y2: f32) -> Furniture {
    Furniture { kind: FurnitureKind::Table, bounds: Rect::from_corners(x1, y1, x2, y2) }
}

fn chair(x1: f32, y1: f32, x2: f32, y2: f32) -> Furniture {
    Furniture { kind: FurnitureKind::Chair, bounds: Rect::from_corners(x1, y1, x2, y2) }
}

/// The office floor plan.
pub fn office() -> FloorPlan {
    let walls = vec![
        wall(-750.0, 600.0, -750.0, -250.0),
        wall(-750.0, -250.0, 550.0, -250.0),
        wall(550.0, -250.0, 550.0, 600.0),
        wall(-550.0, 600.0, 550.0, 600.0),
    ];

    let rooms = vec![
        room("Office 1", (-750.0, 350.0, -550.0, 600.0), (-700.0, 500.0)),
        room("Office 2", (-750.0, 50.0, -550.0, 300.0), (-700.0, 200.0)),
        room("Office 3", (-750.0, -250.0, -550.0, 0.0), (-700.0, -100.0)),
        room("Conference Room Left", (-500.0, 50.0, -250.0, 300.0), (-400.0, 200.0)),
        room("Conference Room Right", (-250.0, 50.0, 300.0, 600.0), (0.0, 400.0)),
        room("Lunchroom", (350.0, 350.0, 550.0, 600.0), (400.0, 500.0)),
        room("Fax/Copy", (350.0, 150.0, 550.0, 300.0), (400.0, 200.0)),
        room("Office 5", (350.0, -100.0, 550.0, 100.0), (400.0, 0.0)),
        room("WC 1", (-250.0, -250.0, -50.0, -50.0), (-200.0, -100.0)),
        room("WC 2", (-50.0, -250.0, 150.0, -50.0), (50.0, -100.0)),
        room("Storage", (-500.0, -250.0, -250.0, -50.0), (-375.0, -100.0)),
    ];

    let furniture = vec![
        // Conference table
        table(-50.0, 250.0, 150.0, 350.0),
        chair(-70.0, 250.0, -50.0, 270.0),
        chair(-70.0, 330.0, -50.0, 350.0),
        chair(130.0, 250.0, 150.0, 270.0),
        chair(130.0, 330.0, 150.0, 350.0),
        // Office 1 desk
        table(-675.0, 425.0, -625.0, 475.0),
        chair(-670.0, 430.0, -660.0, 440.0),
        chair(-670.0, 470.0, -660.0, 460.0),
        // Office 2 desk
        table(-675.0, 125.0, -625.0, 175.0),
        chair(-670.0, 130.0, -660.0, 140.0),
        chair(-670.0, 170.0, -660.0, 160.0),
        // Office 3 desk
        table(-675.0, -175.0, -625.0, -125.0),
        chair(-670.0, -170.0, -660.0, -160.0),
        chair(-670.0, -130.0, -660.0, -140.0),
        // Side table
        table(50.0, 350.0, 100.0, 400.0),
        chair(55.0, 355.0, 65.0, 365.0),
        chair(95.0, 355.0, 85.0, 365.0),
        // Lunchroom table
        table(400.0, 450.0, 450.0, 500.0),
        chair(380.0, 460.0, 390.0, 470.0),
        chair(420.0, 460.0, 430.0, 470.0),
        chair(380.0, 490.0, 390.0, 500.0),
    ];

    let exits = vec![
        Point::new(-750.0, 300.0),
        Point::new(-750.0, -25.0),
        Point::new(550.0, 200.0),
        Point::new(550.0, -50.0),
    ];

    let entries = vec![
        Point::new(-550.0, 500.0),
        Point::new(-550.0, 100.0),
        Point::new(-550.0, -25.0),
        Point::new(-450.0, 300.0),
        Point::new(-250.0, 400.0),
        Point::new(350.0, 500.0),
        Point::new(350.0, 200.0),
        Point::new(350.0, -50.0),
        Point::new(-200.0, -50.0),
        Point::new(-25.0, -50.0),
        Point::new(-375.0, -50.0),
        Point::new(-500.0, 120.0),
        Point::new(-450.0, 50.0),
        Point::new(-200.0, 50.0),
        Point::new(350.0, 500.0),
    ];

    FloorPlan { walls, rooms, furniture, exits, entries }
}

/// The agents present when the program starts or is reset.
pub fn default_agents() -> Result<Vec<Agent>, NavigationError> {
    let routes: [((f32, f32), (f32, f32), f32); 8] = [
        ((-700.0, 500.0), (-700.0, 200.0), 1.0),  // Office 1 to Office 2
        ((-700.0, 200.0), (-700.0, -100.0), 0.5), // Office 2 to Office 3
        ((-400.0, 200.0), (0.0, 400.0), 0.8),     // Conference rooms
        ((400.0, 500.0), (400.0, 200.0), 0.7),    // Lunchroom to Fax/Copy
        ((400.0, 0.0), (400.0, -100.0), 0.4),     // Fax/Copy to Office 5
        ((-200.0, -100.0), (-250.0, -250.0), 0.6), // WC 1 to Storage
        ((-50.0, -100.0), (-50.0, -250.0), 0.7),  // WC 2 to WC 1
        ((-375.0, -100.0), (-500.0, -250.0), 0.5), // Storage to WC 1
    ];

    routes
        .into_iter()
        .map(|(from, to, speed)| Agent::with_destination(from.into(), to.into(), speed))
        .collect()
}

/// The agent added by the `A` key.
pub fn spawn_agent() -> Result<Agent, NavigationError> {
    Agent::with_destination(Point::ORIGIN, Point::new(100.0, 100.0), 0.5)
}
