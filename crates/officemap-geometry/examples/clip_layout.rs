use officemap_geometry::*;

fn main() {
    let region = match ClipRegion::new(-750.0, 550.0, -550.0, 600.0) {
        Ok(region) => region,
        Err(e) => {
            eprintln!("Failed to build clip region: {}", e);
            return;
        }
    };

    println!("Clipping walls against {}", region);

    // Outer walls of the office plus two lines that leave the visible area.
    let walls = [
        (Point::new(-750.0, 600.0), Point::new(-750.0, -250.0)),
        (Point::new(-750.0, -250.0), Point::new(550.0, -250.0)),
        (Point::new(550.0, -250.0), Point::new(550.0, 600.0)),
        (Point::new(-550.0, 600.0), Point::new(550.0, 600.0)),
        (Point::new(-900.0, 0.0), Point::new(900.0, 100.0)),
        (Point::new(600.0, -700.0), Point::new(700.0, 700.0)),
    ];

    for (i, (p0, p1)) in walls.iter().enumerate() {
        print!("Wall {:>2}: {} -> {}  [{:?} / {:?}]  ", i, p0, p1, region.outcode(*p0), region.outcode(*p1));
        match region.clip_segment(*p0, *p1) {
            Some(segment) => println!("visible: {} (length {:.1})", segment, segment.length()),
            None => println!("rejected"),
        }
    }
}
