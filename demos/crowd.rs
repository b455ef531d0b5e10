//! Headless crowd simulation.
//!
//! Run: cargo run --bin crowd -- [seed] [agents] [ticks]

use rand::SeedableRng;
use rand::rngs::StdRng;
use tileroute_demos::{Crowd, HEIGHT, TickReport, WIDTH};

fn arg_or<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|a| a.parse().ok())
        .unwrap_or(default)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = arg_or(&args, 1, 42);
    let agents: usize = arg_or(&args, 2, 24);
    let ticks: usize = arg_or(&args, 3, 60);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut crowd = Crowd::random(&mut rng, WIDTH, HEIGHT, agents);
    println!("seed {seed}, {} agents", crowd.agents().len());
    print!("{}", crowd.render());

    let mut total = TickReport::default();
    for _ in 0..ticks {
        let report = crowd.tick();
        println!(
            "tick {:>3}: moved {:>3}  arrived {:>3}  waiting {:>3}  partial {:>3}  expanded {:>6}",
            crowd.ticks(),
            report.moved,
            report.arrived,
            report.waiting,
            report.partial,
            report.expanded,
        );
        total.moved += report.moved;
        total.waiting += report.waiting;
        total.partial += report.partial;
        total.expanded += report.expanded;
        total.arrived = report.arrived;
        if report.arrived == crowd.agents().len() {
            break;
        }
    }

    print!("{}", crowd.render());
    println!(
        "{} ticks: {} of {} agents arrived, {} moves, {} expansions",
        crowd.ticks(),
        total.arrived,
        crowd.agents().len(),
        total.moved,
        total.expanded,
    );
}
