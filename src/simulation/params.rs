//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravity acceleration applied to every dynamic body,
//! - the fixed integration step size,
//! - positional-correction factor and penetration slop for the contact solver
//!
//! The physical constants below feed the defaults, but every `World` carries
//! its own `Parameters` copy, so two simulations can run under different
//! physics (e.g. tests under varied gravity).

use super::states::NVec2;

/// Standard gravity at the Earth's surface, m/s^2
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Speed of light in vacuum, m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub gravity: NVec2, // acceleration applied every step, m/s^2
    pub fixed_timestep: f64, // step size in seconds, decoupled from frame time
    pub position_correction: f64, // fraction of penetration removed per step, in [0, 1]
    pub penetration_slop: f64, // overlap tolerated before correction kicks in, meters
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: NVec2::new(0.0, -STANDARD_GRAVITY),
            fixed_timestep: 1.0 / 120.0,
            position_correction: 0.8,
            penetration_slop: 0.005,
        }
    }
}

impl Parameters {
    /// Clamp solver settings into their valid ranges.
    pub fn sanitized(mut self) -> Self {
        self.position_correction = self.position_correction.clamp(0.0, 1.0);
        self.penetration_slop = self.penetration_slop.max(0.0);
        self
    }
}
