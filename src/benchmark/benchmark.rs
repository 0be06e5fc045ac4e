use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};
use crate::simulation::world::World;

/// Time `World::step` across a range of body counts.
///
/// Bodies are laid out deterministically (sin/cos lattice, no rand needed)
/// so successive runs time the exact same work.
pub fn bench_step() {
    // Different world sizes to test
    let ns = [50, 100, 200, 400, 800];
    let steps = 120; // one simulated second at the default step size

    for n in ns {
        let mut world = World::new(Parameters::default());
        let h = world.params().fixed_timestep;

        // Build a deterministic cloud of unit-mass circles
        for i in 0..n {
            let i_f = i as f64;
            let x = NVec2::new((i_f * 0.37).sin() * 50.0, (i_f * 0.13).cos() * 50.0);
            let v = NVec2::new((i_f * 0.07).cos(), (i_f * 0.11).sin());

            world
                .add_body(Body::dynamic(x, v, 1.0, 0.5, 0.5))
                .expect("bench bodies are valid");
        }

        // Warm up
        world.step(h).expect("bench step size is valid");

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(h).expect("bench step size is valid");
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "N = {n:4}, {steps} steps = {elapsed:8.6} s, {:10.1} steps/s",
            steps as f64 / elapsed
        );
    }
}
