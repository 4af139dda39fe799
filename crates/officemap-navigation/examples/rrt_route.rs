use officemap_navigation::{Agent, ClipRegion, PlanOutcome, Point, RrtConfig, RrtPlanner};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let bounds = ClipRegion::new(-750.0, 550.0, -550.0, 600.0).unwrap();
    let entry_points = [
        Point::new(-550.0, 500.0),
        Point::new(-550.0, 100.0),
        Point::new(-450.0, 300.0),
        Point::new(350.0, 200.0),
        Point::new(-25.0, -50.0),
    ];
    let planner = RrtPlanner::new(RrtConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    println!("Sampling bounds: {}", bounds);
    println!("Planner: {:?}\n", planner.config());

    let starts = [
        Point::new(-700.0, 500.0),
        Point::new(-400.0, 200.0),
        Point::new(400.0, 0.0),
        Point::new(-375.0, -100.0),
    ];

    for start in starts {
        let mut agent = Agent::new(start, 0.5).unwrap();
        match planner.plan_route(&mut agent, &bounds, &entry_points, &mut rng) {
            Ok(PlanOutcome::Reached { entry_index, entry, iterations, tree_size }) => {
                println!(
                    "{} -> entry #{} at {} after {} iterations ({} nodes)",
                    start, entry_index, entry, iterations, tree_size
                );

                let mut ticks = 0;
                while agent.has_destination() {
                    agent.advance();
                    ticks += 1;
                }
                println!("    walked there in {} ticks, now at {}", ticks, agent.position());
            }
            Ok(PlanOutcome::Exhausted { iterations, .. }) => {
                println!("{} -> no entry point reached in {} iterations", start, iterations);
            }
            Ok(PlanOutcome::AlreadyRouted) => println!("{} -> already routed", start),
            Err(e) => println!("{} -> error: {}", start, e),
        }
    }
}
