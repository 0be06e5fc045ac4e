use ballsim::{FixedTimestep, Scenario, ScenarioConfig};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "bouncing.yaml")]
    file_name: String,
}

// load here to keep main clean
fn load_scenario_from_yaml() -> Result<ScenarioConfig> {
    let args = Args::parse();
    let file_name = args.file_name;

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(&file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    // Env-driven logging, e.g. RUST_LOG=trace for per-step solver output
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let scenario_cfg = load_scenario_from_yaml()?;
    let Scenario {
        mut world,
        t_end,
        frame,
        ..
    } = Scenario::build_scenario(scenario_cfg)?;

    let h = world.params().fixed_timestep;
    let mut clock = FixedTimestep::new(h);

    log::info!(
        "running {} bodies to t = {} s (h = {} s)",
        world.body_count(),
        t_end,
        h
    );

    // Headless frame loop: bank one nominal frame of elapsed time, then take
    // however many fixed steps it pays for. A GUI harness would feed real
    // elapsed wall-clock time here instead and render between frames.
    while world.time() < t_end {
        for _ in 0..clock.advance(frame) {
            world.step(h)?;
        }
    }

    for (handle, body) in world.bodies() {
        println!(
            "body {:3}: x = ({:9.4}, {:9.4}), v = ({:9.4}, {:9.4})",
            handle.index, body.x.x, body.x.y, body.v.x, body.v.y
        );
    }

    //bench_step();

    Ok(())
}
