//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WorldConfig`] – solver options (gravity, step size, correction, slop)
//! - [`RunConfig`]   – how long the driver runs and at what frame pacing
//! - [`BodyConfig`]  – initial state for each body
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every optional field has a documented default, so leaving a field (or the
//! whole `world` section) out never changes results from run to run.
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! world:
//!   gravity: [0.0, -9.80665]   # m/s^2, default standard gravity downward
//!   fixed_timestep: 0.008333   # seconds, default 1/120
//!   position_correction: 0.8   # fraction of overlap removed per step
//!   penetration_slop: 0.005    # overlap tolerated before correction, meters
//!
//! run:
//!   t_end: 10.0                # simulated seconds to run
//!   frame: 0.016667            # nominal frame duration, default 1/60
//!
//! bodies:
//!   - x: [ 0.0, -1.0 ]
//!     radius: 1.0
//!     restitution: 0.9
//!     fixed: true              # immovable floor circle
//!   - x: [ 0.0, 5.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0
//!     radius: 0.5
//!     restitution: 0.7
//! ```
//!
//! The engine then maps this configuration into its runtime representation
//! via `Scenario::build_scenario`, validating every body on the way in.

use serde::Deserialize;

/// World-level solver options. Every field is optional; missing fields use
/// the documented defaults, so an empty (or absent) section is valid.
#[derive(Deserialize, Debug, Default)]
pub struct WorldConfig {
    pub gravity: Option<[f64; 2]>, // m/s^2, default (0, -9.80665)
    pub fixed_timestep: Option<f64>, // seconds, default 1/120
    pub position_correction: Option<f64>, // in [0, 1], default 0.8
    pub penetration_slop: Option<f64>, // meters, default 0.005
}

/// How long and at what nominal frame pacing the driver runs a scenario
#[derive(Deserialize, Debug)]
pub struct RunConfig {
    pub t_end: f64, // simulated seconds to run
    pub frame: Option<f64>, // frame duration fed to the accumulator, default 1/60
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position, meters
    pub v: Option<[f64; 2]>, // initial velocity, m/s, default (0, 0)
    pub m: Option<f64>, // mass, kg, default 1.0 (ignored for fixed bodies)
    pub radius: f64, // radius, meters, must be > 0
    pub restitution: Option<f64>, // in [0, 1], default 0.5
    pub fixed: Option<bool>, // immovable body, default false
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub world: WorldConfig, // solver options, all optional
    pub run: RunConfig, // run length and frame pacing
    pub bodies: Vec<BodyConfig>, // list of bodies that define the initial state
}
