//! Build a runnable simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! a fully-populated [`World`] plus the run settings the driver needs.
//! Every configured body passes through [`World::add_body`], so bad
//! geometry in a scenario file is rejected up front instead of surfacing
//! mid-run.

use log::debug;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::error::SimulationError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyHandle, NVec2};
use crate::simulation::world::World;

/// Runtime bundle for one simulation run
pub struct Scenario {
    pub world: World,
    pub handles: Vec<BodyHandle>, // one handle per configured body, in file order
    pub t_end: f64, // simulated seconds to run
    pub frame: f64, // nominal frame duration fed to the accumulator
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimulationError> {
        let defaults = Parameters::default();

        // Parameters (runtime) from WorldConfig, falling back field by field
        let params = Parameters {
            gravity: cfg
                .world
                .gravity
                .map(|g| NVec2::new(g[0], g[1]))
                .unwrap_or(defaults.gravity),
            fixed_timestep: cfg.world.fixed_timestep.unwrap_or(defaults.fixed_timestep),
            position_correction: cfg
                .world
                .position_correction
                .unwrap_or(defaults.position_correction),
            penetration_slop: cfg
                .world
                .penetration_slop
                .unwrap_or(defaults.penetration_slop),
        };

        if !(params.gravity.x.is_finite() && params.gravity.y.is_finite()) {
            return Err(SimulationError::DegenerateGeometry {
                reason: "gravity must be finite".into(),
            });
        }

        // A configured step size the world itself would reject must fail the
        // build, not the thousandth step
        if !(params.fixed_timestep > 0.0) || !params.fixed_timestep.is_finite() {
            return Err(SimulationError::InvalidTimestep {
                dt: params.fixed_timestep,
            });
        }

        let frame = cfg.run.frame.unwrap_or(1.0 / 60.0);
        if !(frame > 0.0) || !frame.is_finite() {
            return Err(SimulationError::InvalidTimestep { dt: frame });
        }

        // Bodies: map `BodyConfig` -> runtime `Body`, validated on insert
        let mut world = World::new(params);
        let mut handles = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            handles.push(world.add_body(body_from_config(bc))?);
        }

        debug!(
            "built scenario: {} bodies, t_end = {} s, frame = {} s",
            world.body_count(),
            cfg.run.t_end,
            frame
        );

        Ok(Self {
            world,
            handles,
            t_end: cfg.run.t_end,
            frame,
        })
    }
}

fn body_from_config(bc: &BodyConfig) -> Body {
    let x = NVec2::new(bc.x[0], bc.x[1]);
    let v = bc
        .v
        .map(|v| NVec2::new(v[0], v[1]))
        .unwrap_or_else(NVec2::zeros);
    let restitution = bc.restitution.unwrap_or(0.5);

    if bc.fixed.unwrap_or(false) {
        Body::fixed(x, bc.radius, restitution)
    } else {
        Body::dynamic(x, v, bc.m.unwrap_or(1.0), bc.radius, restitution)
    }
}
