//! Recoverable error values reported by the physics core
//!
//! Every failure leaves the `World` unchanged: `step` validates its timestep
//! before touching any body, and handle lookups reject stale references
//! without side effects.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// `step` was called with a non-positive (or non-finite) timestep
    #[error("invalid timestep {dt}: step size must be positive and finite")]
    InvalidTimestep { dt: f64 },

    /// A body handle that was never issued, or whose body has been removed
    #[error("invalid body handle (index {index}, generation {generation})")]
    InvalidHandle { index: u32, generation: u32 },

    /// Geometry the solver cannot work with, e.g. a non-positive radius
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },
}
