//! Acceleration contributors for the rigid-circle engine
//!
//! Defines the [`Acceleration`] trait and the [`AccelSet`] collection that
//! sums per-body accelerations each step. Uniform gravity is the only
//! built-in term; further terms (drag, wind, ...) can be registered with
//! [`AccelSet::with`]

use crate::simulation::states::{NVec2, System};

/// Collection of acceleration terms
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body slot
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all body slots in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - entries for empty or static slots are left at zero
    pub fn accumulate_accels(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on a [`System`]
/// Implementations add their contribution into `out[i]` for each body slot
pub trait Acceleration {
    fn acceleration(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Constant acceleration field, the same for every dynamic body
/// Mass cancels in a uniform field, so the per-body contribution is `g`
/// itself regardless of how heavy the body is
pub struct UniformGravity {
    pub g: NVec2, // m/s^2
}

impl Acceleration for UniformGravity {
    fn acceleration(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        for (i, body) in sys.iter() {
            // Static bodies never integrate, skip them here too
            if body.is_dynamic() {
                out[i] += self.g;
            }
        }
    }
}
