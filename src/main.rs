use std::fs::File;
use std::io::BufWriter;
use std::thread::sleep;
use std::time::Duration;

use itertools::Itertools;
use log::info;
use traffic_replay::{
    json, FrameSequence, Player, Result, Scenario, Step, StepSource, WorldRegistry,
};

/// The delay between replayed frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Usage:
/// * `traffic-replay` - replays a generated intersection scenario
/// * `traffic-replay <steps.json>` - replays a step file
/// * `traffic-replay --record <steps.json>` - writes a generated scenario to a step file
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => play(Scenario::world(), Scenario::default()),
        [flag, path] if flag == "--record" => {
            let frames = Scenario::default().record();
            json::to_writer(BufWriter::new(File::create(path)?), &frames)?;
            println!("Recorded {} frames to {}", frames.len(), path);
            Ok(())
        }
        [path] => {
            let frames = json::from_path(path)?;
            info!("Loaded {} frames from {}", frames.len(), path);
            play(Scenario::world(), FrameSequence::new(frames))
        }
        _ => {
            eprintln!("usage: traffic-replay [--record] [steps.json]");
            std::process::exit(2);
        }
    }
}

fn play(world: WorldRegistry, source: impl StepSource) -> Result<()> {
    let mut player = Player::new(world, source);
    while let Step::Advanced(report) = player.step()? {
        let world = player.world();
        let stopped = world.iter_vehicles().filter(|v| v.is_stopped()).count();
        let passed = world.iter_vehicles().filter(|v| v.has_passed_light()).count();
        let lights = world
            .iter_lights()
            .map(|light| format!("{}={}", light.id(), light.phase()))
            .join(" ");
        println!(
            "Step {}: {} vehicles ({} stopped, {} passed) | {}",
            report.step,
            world.vehicle_count(),
            stopped,
            passed,
            lights
        );
        sleep(FRAME_INTERVAL);
    }
    println!("Replay finished after {} frames.", player.engine().step_index());
    Ok(())
}
