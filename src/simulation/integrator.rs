//! Fixed-step time integration for the rigid-circle system
//!
//! Provides a semi-implicit (symplectic) Euler integrator driven by an
//! [`AccelSet`]: velocities are kicked by the accumulated accelerations
//! first, then positions drift with the already-updated velocities.
//! One force evaluation per step.

use super::forces::AccelSet;
use super::states::{NVec2, System};

/// Advance every dynamic body in `sys` by one step of size `dt`.
/// Static bodies are left untouched; `sys.t` advances by `dt` either way.
pub fn euler_integrator(sys: &mut System, forces: &AccelSet, dt: f64) {
    let n = sys.slots.len();
    if n == 0 { // no bodies, just advance the clock
        sys.t += dt;
        return;
    }

    // Allocate a vector of accelerations, one per slot, initialized to zero.
    // a[i] holds the summed acceleration for slot i at the current time t_n
    let mut a = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.t, &*sys, &mut a);

    // Kick: v_n+1 = v_n + dt * a_n
    for (i, body) in sys.iter_mut() {
        if body.is_dynamic() {
            body.v += dt * a[i];
        }
    }

    // Drift with the updated velocity: x_n+1 = x_n + dt * v_n+1
    // Updating velocity before position is what makes the scheme
    // semi-implicit rather than explicit Euler
    for (_, body) in sys.iter_mut() {
        if body.is_dynamic() {
            body.x += dt * body.v;
        }
    }

    // Increment the system time by one full step
    sys.t += dt;
}
