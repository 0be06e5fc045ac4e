//! The `World`: body table, parameters, forces, and the fixed step
//!
//! Owns everything one simulation instance needs and exposes the
//! handle-based API a host harness drives:
//! - [`World::add_body`] / [`World::remove_body`] / [`World::body_state`]
//! - [`World::step`], the deterministic fixed-timestep advance
//!
//! The contract is single-writer: exactly one thread mutates the world at a
//! time. A harness that shares the world across threads must serialize
//! access itself (a lock around the whole `World` is enough, it contains no
//! interior mutability).

use log::trace;

use super::collision::{find_contacts, resolve_contacts, BroadPhase, BruteForce};
use super::error::SimulationError;
use super::forces::{AccelSet, Acceleration, UniformGravity};
use super::integrator::euler_integrator;
use super::params::Parameters;
use super::states::{Body, BodyHandle, System};

pub struct World {
    system: System,
    params: Parameters,
    forces: AccelSet,
    broad_phase: Box<dyn BroadPhase + Send + Sync>,
}

impl World {
    /// Build an empty world from `params`. Gravity is registered as the
    /// first acceleration term; solver settings are clamped into range.
    pub fn new(params: Parameters) -> Self {
        let params = params.sanitized();
        let forces = AccelSet::new().with(UniformGravity { g: params.gravity });

        Self {
            system: System::new(),
            params,
            forces,
            broad_phase: Box::new(BruteForce),
        }
    }

    /// Register an extra acceleration term (drag, wind, ...)
    pub fn with_force<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.forces = self.forces.with(term);
        self
    }

    /// Swap in a different broad phase
    pub fn with_broad_phase<B>(mut self, broad_phase: B) -> Self
    where
        B: BroadPhase + Send + Sync + 'static,
    {
        self.broad_phase = Box::new(broad_phase);
        self
    }

    /// Spawn a body into the world and return its handle.
    ///
    /// Rejects non-finite position/velocity, non-positive radius, and
    /// non-positive (or non-finite) mass on dynamic bodies.
    pub fn add_body(&mut self, body: Body) -> Result<BodyHandle, SimulationError> {
        if !(body.x.x.is_finite() && body.x.y.is_finite() && body.v.x.is_finite() && body.v.y.is_finite()) {
            return Err(SimulationError::DegenerateGeometry {
                reason: "body position and velocity must be finite".into(),
            });
        }
        if !(body.radius > 0.0 && body.radius.is_finite()) {
            return Err(SimulationError::DegenerateGeometry {
                reason: format!("body radius {} must be positive and finite", body.radius),
            });
        }
        if body.is_dynamic() && !(body.m > 0.0 && body.m.is_finite()) {
            return Err(SimulationError::DegenerateGeometry {
                reason: format!("dynamic body mass {} must be positive and finite", body.m),
            });
        }

        Ok(self.system.insert(body))
    }

    /// Despawn the body behind `handle` and return its final state.
    /// The world never removes bodies on its own; despawn policy (e.g.
    /// out-of-bounds culling) belongs to the caller.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body, SimulationError> {
        self.system
            .remove(handle)
            .ok_or(SimulationError::InvalidHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    /// Snapshot of the body behind `handle`
    pub fn body_state(&self, handle: BodyHandle) -> Result<Body, SimulationError> {
        self.system
            .get(handle)
            .cloned()
            .ok_or(SimulationError::InvalidHandle {
                index: handle.index,
                generation: handle.generation,
            })
    }

    /// Advance the simulation by one step of size `dt`:
    /// 1. kick velocities with the accumulated accelerations (gravity)
    /// 2. drift positions with the updated velocities
    /// 3. broad + narrow phase circle-circle detection
    /// 4. impulse resolution and positional correction per contact
    ///
    /// `dt <= 0` (and NaN) is rejected before any body is touched, so a
    /// failed call leaves the world exactly as it was. Given identical
    /// inputs the step is fully deterministic: slot order fixes pair order
    /// and nothing reads the wall clock or randomness.
    pub fn step(&mut self, dt: f64) -> Result<(), SimulationError> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SimulationError::InvalidTimestep { dt });
        }

        euler_integrator(&mut self.system, &self.forces, dt);

        let pairs = self.broad_phase.candidate_pairs(&self.system);
        let contacts = find_contacts(&self.system, &pairs);
        resolve_contacts(&mut self.system, &contacts, &self.params);

        trace!(
            "step: t = {:.6} s, bodies = {}, candidates = {}, contacts = {}",
            self.system.t,
            self.system.len(),
            pairs.len(),
            contacts.len()
        );

        Ok(())
    }

    /// Current simulation time, seconds
    pub fn time(&self) -> f64 {
        self.system.t
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.system.len()
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Iterate live bodies with their handles, in slot order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.system.slots.iter().enumerate().filter_map(|(i, s)| {
            s.body.as_ref().map(|b| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    b,
                )
            })
        })
    }
}
