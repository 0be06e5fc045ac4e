//! Fixed-timestep accumulator for host harnesses
//!
//! The render harness owns the real frame loop; physics only ever advances
//! in fixed-size steps. Each frame the harness feeds its elapsed wall-clock
//! seconds into [`FixedTimestep::advance`], calls `World::step` that many
//! times, then renders. The unconsumed remainder carries over to the next
//! frame, and [`FixedTimestep::alpha`] exposes the leftover fraction of a
//! step for render interpolation.

/// Accumulates frame time and converts it into a whole number of fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    h: f64, // step size, seconds
    acc: f64, // unconsumed frame time, always in [0, max_accum]
    max_accum: f64, // cap on banked time, bounds the catch-up burst after a stall
}

impl FixedTimestep {
    /// At most this many steps can be owed after a single frame
    const MAX_STEPS_PER_FRAME: f64 = 8.0;

    /// Build an accumulator around step size `h` (seconds, must be > 0;
    /// `Scenario::build_scenario` guarantees this for configured worlds)
    pub fn new(h: f64) -> Self {
        Self {
            h,
            acc: 0.0,
            max_accum: h * Self::MAX_STEPS_PER_FRAME,
        }
    }

    /// Bank `elapsed` seconds of frame time and return how many fixed steps
    /// the caller now owes. Non-positive elapsed time banks nothing.
    /// Time beyond the cap is dropped: after a long stall the simulation
    /// slows down instead of firing an unbounded catch-up burst.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if elapsed > 0.0 {
            self.acc = (self.acc + elapsed).min(self.max_accum);
        }
        let steps = (self.acc / self.h).floor();
        self.acc -= steps * self.h;
        steps as u32
    }

    /// Fraction of a step left in the bank, in [0, 1). A renderer blends
    /// the previous and current body states by this amount.
    pub fn alpha(&self) -> f64 {
        self.acc / self.h
    }

    /// The fixed step size this accumulator was built around
    pub fn step_size(&self) -> f64 {
        self.h
    }
}
