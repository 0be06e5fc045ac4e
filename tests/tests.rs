use ballsim::simulation::driver::FixedTimestep;
use ballsim::simulation::error::SimulationError;
use ballsim::simulation::params::Parameters;
use ballsim::simulation::scenario::Scenario;
use ballsim::simulation::states::{Body, BodyHandle, NVec2};
use ballsim::simulation::world::World;
use ballsim::configuration::config::ScenarioConfig;

/// World with gravity switched off, default solver settings otherwise
fn zero_gravity_world() -> World {
    World::new(Parameters {
        gravity: NVec2::zeros(),
        ..Parameters::default()
    })
}

/// Two equal unit-mass circles closing head-on along the x-axis,
/// already slightly overlapping so the first step produces a contact
fn head_on_pair(world: &mut World, restitution: f64) -> (BodyHandle, BodyHandle) {
    let a = world
        .add_body(Body::dynamic(
            NVec2::new(-0.5, 0.0),
            NVec2::new(1.0, 0.0),
            1.0,
            0.6,
            restitution,
        ))
        .expect("valid body");
    let b = world
        .add_body(Body::dynamic(
            NVec2::new(0.5, 0.0),
            NVec2::new(-1.0, 0.0),
            1.0,
            0.6,
            restitution,
        ))
        .expect("valid body");
    (a, b)
}

// ==================================================================================
// Integration tests
// ==================================================================================

#[test]
fn free_fall_velocity_matches_gravity() {
    let mut world = World::new(Parameters::default());
    let handle = world
        .add_body(Body::dynamic(
            NVec2::new(0.0, 100.0),
            NVec2::zeros(),
            1.0,
            1.0,
            0.0,
        ))
        .expect("valid body");

    let dt = 0.01;
    let n = 100;
    for _ in 0..n {
        world.step(dt).expect("positive dt");
    }

    let body = world.body_state(handle).expect("live handle");
    let expected = world.params().gravity.y * n as f64 * dt;
    assert!(
        (body.v.y - expected).abs() < 1e-9,
        "v.y = {}, expected {}",
        body.v.y,
        expected
    );
    assert!(body.v.x.abs() < 1e-12, "free fall must stay vertical");
}

#[test]
fn identical_worlds_replay_identically() {
    let build = || {
        let mut world = World::new(Parameters::default());
        world
            .add_body(Body::fixed(NVec2::new(0.0, -1.0), 1.0, 0.3))
            .expect("valid body");
        world
            .add_body(Body::dynamic(
                NVec2::new(0.1, 3.0),
                NVec2::new(-0.2, 0.0),
                1.0,
                0.5,
                0.6,
            ))
            .expect("valid body");
        world
            .add_body(Body::dynamic(
                NVec2::new(-0.3, 5.0),
                NVec2::new(0.1, 0.0),
                2.0,
                0.5,
                0.4,
            ))
            .expect("valid body");
        world
    };

    let mut w1 = build();
    let mut w2 = build();
    let dt = w1.params().fixed_timestep;

    for _ in 0..500 {
        w1.step(dt).expect("positive dt");
        w2.step(dt).expect("positive dt");
    }

    // Bitwise equality: nothing in the step may depend on anything but the
    // inputs, so two identical worlds stay identical forever
    for ((h1, b1), (h2, b2)) in w1.bodies().zip(w2.bodies()) {
        assert_eq!(h1, h2);
        assert_eq!(b1.x, b2.x, "positions diverged at body {}", h1.index);
        assert_eq!(b1.v, b2.v, "velocities diverged at body {}", h1.index);
    }
}

// ==================================================================================
// Handle / world API tests
// ==================================================================================

#[test]
fn removed_body_handle_goes_stale() {
    let mut world = zero_gravity_world();
    let handle = world
        .add_body(Body::dynamic(NVec2::zeros(), NVec2::zeros(), 1.0, 1.0, 0.5))
        .expect("valid body");

    assert!(world.body_state(handle).is_ok());

    let removed = world.remove_body(handle).expect("live handle");
    assert_eq!(removed.radius, 1.0);
    assert_eq!(world.body_count(), 0);

    assert_eq!(
        world.body_state(handle),
        Err(SimulationError::InvalidHandle {
            index: handle.index,
            generation: handle.generation
        })
    );
    assert!(world.remove_body(handle).is_err(), "double remove must fail");
}

#[test]
fn slot_reuse_keeps_old_handle_invalid() {
    let mut world = zero_gravity_world();
    let first = world
        .add_body(Body::dynamic(NVec2::zeros(), NVec2::zeros(), 1.0, 1.0, 0.5))
        .expect("valid body");
    world.remove_body(first).expect("live handle");

    // Reuses slot 0 under a bumped generation
    let second = world
        .add_body(Body::dynamic(NVec2::new(2.0, 0.0), NVec2::zeros(), 1.0, 1.0, 0.5))
        .expect("valid body");

    assert_eq!(first.index, second.index);
    assert_ne!(first.generation, second.generation);
    assert!(world.body_state(first).is_err(), "stale handle must not resolve");
    assert_eq!(world.body_state(second).expect("live handle").x.x, 2.0);
}

#[test]
fn degenerate_bodies_are_rejected() {
    let mut world = zero_gravity_world();

    let zero_radius = Body::dynamic(NVec2::zeros(), NVec2::zeros(), 1.0, 0.0, 0.5);
    assert!(matches!(
        world.add_body(zero_radius),
        Err(SimulationError::DegenerateGeometry { .. })
    ));

    let zero_mass = Body::dynamic(NVec2::zeros(), NVec2::zeros(), 0.0, 1.0, 0.5);
    assert!(matches!(
        world.add_body(zero_mass),
        Err(SimulationError::DegenerateGeometry { .. })
    ));

    let nan_position = Body::dynamic(NVec2::new(f64::NAN, 0.0), NVec2::zeros(), 1.0, 1.0, 0.5);
    assert!(matches!(
        world.add_body(nan_position),
        Err(SimulationError::DegenerateGeometry { .. })
    ));

    assert_eq!(world.body_count(), 0);
}

#[test]
fn non_positive_dt_is_rejected_without_mutation() {
    let mut world = World::new(Parameters::default());
    let handle = world
        .add_body(Body::dynamic(
            NVec2::new(1.0, 2.0),
            NVec2::new(3.0, 4.0),
            1.0,
            0.5,
            0.5,
        ))
        .expect("valid body");

    assert_eq!(world.step(0.0), Err(SimulationError::InvalidTimestep { dt: 0.0 }));
    assert_eq!(world.step(-1.0), Err(SimulationError::InvalidTimestep { dt: -1.0 }));
    assert!(world.step(f64::NAN).is_err());

    // A rejected step leaves everything untouched, clock included
    let body = world.body_state(handle).expect("live handle");
    assert_eq!(body.x, NVec2::new(1.0, 2.0));
    assert_eq!(body.v, NVec2::new(3.0, 4.0));
    assert_eq!(world.time(), 0.0);
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn elastic_head_on_collision_swaps_velocities() {
    let mut world = zero_gravity_world();
    let (a, b) = head_on_pair(&mut world, 1.0);

    world.step(1e-3).expect("positive dt");

    let ba = world.body_state(a).expect("live handle");
    let bb = world.body_state(b).expect("live handle");
    assert!(
        (ba.v.x + 1.0).abs() < 1e-9,
        "left body should bounce back with -1, got {}",
        ba.v.x
    );
    assert!(
        (bb.v.x - 1.0).abs() < 1e-9,
        "right body should bounce back with +1, got {}",
        bb.v.x
    );
}

#[test]
fn inelastic_head_on_collision_kills_normal_velocity() {
    let mut world = zero_gravity_world();
    let (a, b) = head_on_pair(&mut world, 0.0);

    world.step(1e-3).expect("positive dt");

    let ba = world.body_state(a).expect("live handle");
    let bb = world.body_state(b).expect("live handle");
    let v_rel = bb.v.x - ba.v.x;
    assert!(
        v_rel.abs() < 1e-9,
        "restitution 0 must zero the relative normal velocity, got {}",
        v_rel
    );
}

#[test]
fn separating_pair_gets_no_impulse() {
    let mut world = zero_gravity_world();
    // Overlapping but already moving apart
    let a = world
        .add_body(Body::dynamic(
            NVec2::new(-0.3, 0.0),
            NVec2::new(-1.0, 0.0),
            1.0,
            0.5,
            1.0,
        ))
        .expect("valid body");
    let b = world
        .add_body(Body::dynamic(
            NVec2::new(0.3, 0.0),
            NVec2::new(1.0, 0.0),
            1.0,
            0.5,
            1.0,
        ))
        .expect("valid body");

    world.step(1e-3).expect("positive dt");

    // Positional correction may still separate them, but velocities stay
    assert_eq!(world.body_state(a).expect("live handle").v, NVec2::new(-1.0, 0.0));
    assert_eq!(world.body_state(b).expect("live handle").v, NVec2::new(1.0, 0.0));
}

#[test]
fn correction_only_moves_the_dynamic_body() {
    let mut world = zero_gravity_world();
    let anchor = world
        .add_body(Body::fixed(NVec2::zeros(), 1.0, 0.5))
        .expect("valid body");
    let mover = world
        .add_body(Body::dynamic(
            NVec2::new(0.5, 0.0),
            NVec2::zeros(),
            1.0,
            1.0,
            0.5,
        ))
        .expect("valid body");

    world.step(1e-3).expect("positive dt");

    let anchor_state = world.body_state(anchor).expect("live handle");
    let mover_state = world.body_state(mover).expect("live handle");

    assert_eq!(anchor_state.x, NVec2::zeros(), "static body must not move");
    assert_eq!(anchor_state.v, NVec2::zeros());
    assert!(
        mover_state.x.x > 0.5,
        "dynamic body should be pushed out, x = {}",
        mover_state.x.x
    );
}

#[test]
fn coincident_centers_separate_along_fixed_axis() {
    let mut world = zero_gravity_world();
    let a = world
        .add_body(Body::dynamic(NVec2::zeros(), NVec2::zeros(), 1.0, 0.5, 0.5))
        .expect("valid body");
    let b = world
        .add_body(Body::dynamic(NVec2::zeros(), NVec2::zeros(), 1.0, 0.5, 0.5))
        .expect("valid body");

    world.step(1e-3).expect("positive dt");

    let ba = world.body_state(a).expect("live handle");
    let bb = world.body_state(b).expect("live handle");

    // Equal masses split the correction evenly along +x, never NaN
    assert!(ba.x.x.is_finite() && bb.x.x.is_finite());
    assert!(
        ba.x.x < bb.x.x,
        "bodies must separate deterministically: {} vs {}",
        ba.x.x,
        bb.x.x
    );
    assert_eq!(ba.x.y, 0.0);
    assert_eq!(bb.x.y, 0.0);
    assert!((ba.x.x + bb.x.x).abs() < 1e-12, "split must be symmetric");
}

#[test]
fn two_static_bodies_overlapping_is_harmless() {
    let mut world = zero_gravity_world();
    let a = world
        .add_body(Body::fixed(NVec2::zeros(), 1.0, 0.5))
        .expect("valid body");
    let b = world
        .add_body(Body::fixed(NVec2::new(0.5, 0.0), 1.0, 0.5))
        .expect("valid body");

    world.step(1e-3).expect("positive dt");

    let ba = world.body_state(a).expect("live handle");
    let bb = world.body_state(b).expect("live handle");
    assert_eq!(ba.x, NVec2::zeros());
    assert_eq!(bb.x, NVec2::new(0.5, 0.0));
    assert!(ba.v.x.is_finite() && bb.v.x.is_finite(), "no NaN from a zero denominator");
}

#[test]
fn dropped_ball_comes_to_rest_on_floor() {
    let mut world = World::new(Parameters::default());
    let floor = world
        .add_body(Body::fixed(NVec2::new(0.0, -1.0), 1.0, 0.0))
        .expect("valid body");
    let ball = world
        .add_body(Body::dynamic(
            NVec2::new(0.0, 10.0),
            NVec2::zeros(),
            1.0,
            1.0,
            0.0,
        ))
        .expect("valid body");

    let dt = world.params().fixed_timestep;
    for _ in 0..2400 { // 20 simulated seconds, far past the fall time
        world.step(dt).expect("positive dt");
    }

    let floor_state = world.body_state(floor).expect("live handle");
    let ball_state = world.body_state(ball).expect("live handle");

    assert_eq!(floor_state.x, NVec2::new(0.0, -1.0), "floor must not move");
    // Resting height is radius_sum above the floor center, up to the slop
    assert!(
        (ball_state.x.y - 1.0).abs() < 0.02,
        "ball should rest at y = 1, got {}",
        ball_state.x.y
    );
    assert!(
        ball_state.v.y.abs() < 1e-6,
        "resting ball should have no vertical velocity, got {}",
        ball_state.v.y
    );
}

// ==================================================================================
// Scenario / configuration tests
// ==================================================================================

#[test]
fn scenario_defaults_fill_missing_fields() {
    let yaml = "
run:
  t_end: 1.0
bodies:
  - x: [0.0, 2.0]
    radius: 0.5
";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");
    let scenario = Scenario::build_scenario(cfg).expect("valid scenario");

    let params = scenario.world.params();
    assert!((params.gravity.y + 9.80665).abs() < 1e-12);
    assert!((params.fixed_timestep - 1.0 / 120.0).abs() < 1e-15);
    assert!((params.position_correction - 0.8).abs() < 1e-15);
    assert!((params.penetration_slop - 0.005).abs() < 1e-15);
    assert!((scenario.frame - 1.0 / 60.0).abs() < 1e-15);

    let body = scenario
        .world
        .body_state(scenario.handles[0])
        .expect("live handle");
    assert_eq!(body.v, NVec2::zeros());
    assert_eq!(body.m, 1.0);
    assert_eq!(body.restitution, 0.5);
    assert!(body.is_dynamic());
}

#[test]
fn scenario_rejects_bad_step_size() {
    let yaml = "
world:
  fixed_timestep: 0.0
run:
  t_end: 1.0
bodies: []
";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(SimulationError::InvalidTimestep { .. })
    ));
}

#[test]
fn scenario_rejects_degenerate_bodies() {
    let yaml = "
run:
  t_end: 1.0
bodies:
  - x: [0.0, 0.0]
    radius: -1.0
";
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).expect("valid yaml");
    assert!(matches!(
        Scenario::build_scenario(cfg),
        Err(SimulationError::DegenerateGeometry { .. })
    ));
}

// ==================================================================================
// Driver tests
// ==================================================================================

#[test]
fn accumulator_pays_out_whole_steps() {
    let mut clock = FixedTimestep::new(0.01);

    assert_eq!(clock.advance(0.02), 2);
    assert!(clock.alpha().abs() < 1e-12, "no remainder after exact frames");

    // Half a step banks but does not pay out
    assert_eq!(clock.advance(0.005), 0);
    assert!((clock.alpha() - 0.5).abs() < 1e-9);

    // The second half completes the step
    assert_eq!(clock.advance(0.005), 1);
    assert!(clock.alpha().abs() < 1e-9);
}

#[test]
fn accumulator_clamps_stalled_frames() {
    let mut clock = FixedTimestep::new(0.01);

    // A ten-second stall must not owe a thousand steps
    let steps = clock.advance(10.0);
    assert_eq!(steps, 8, "catch-up burst is capped");
}

#[test]
fn accumulator_ignores_non_positive_elapsed_time() {
    let mut clock = FixedTimestep::new(0.01);
    assert_eq!(clock.advance(-1.0), 0);
    assert_eq!(clock.advance(0.0), 0);
    assert_eq!(clock.alpha(), 0.0);
}
