//! Core state types for the rigid-circle simulation.
//!
//! Defines the body and world-state structs:
//! - `Body` with position, velocity, mass, radius, restitution
//! - `BodyKind` marking a body dynamic or static
//! - `BodyHandle` / `Slot` for generation-tagged body storage
//! - `System` holding the slot table and the current simulation time `t`

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Whether a body is moved by the solver or pinned in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position, meters
    pub v: NVec2, // velocity, m/s
    pub m: f64, // mass, kg
    pub radius: f64, // radius, meters
    pub restitution: f64, // 0.0 fully absorbs normal velocity, 1.0 fully conserves it
    pub kind: BodyKind, // static bodies never move
}

impl Body {
    /// Build a dynamic body. Restitution is clamped to `[0, 1]`.
    pub fn dynamic(x: NVec2, v: NVec2, m: f64, radius: f64, restitution: f64) -> Self {
        Self {
            x,
            v,
            m,
            radius,
            restitution: restitution.clamp(0.0, 1.0),
            kind: BodyKind::Dynamic,
        }
    }

    /// Build a static (immovable) body. Restitution is clamped to `[0, 1]`.
    pub fn fixed(x: NVec2, radius: f64, restitution: f64) -> Self {
        Self {
            x,
            v: NVec2::zeros(),
            m: f64::INFINITY,
            radius,
            restitution: restitution.clamp(0.0, 1.0),
            kind: BodyKind::Static,
        }
    }

    /// Inverse mass used by the contact solver. Zero for static bodies.
    pub fn inv_mass(&self) -> f64 {
        match self.kind {
            BodyKind::Dynamic => 1.0 / self.m,
            BodyKind::Static => 0.0,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
}

/// Stable reference to a body in a [`System`].
///
/// Handles are generation-tagged: removing a body bumps its slot generation,
/// so a stale handle keeps failing even after the slot index is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    pub index: u32,
    pub generation: u32,
}

/// One entry in the body table. `body` is `None` while the slot sits on the
/// free list.
#[derive(Debug, Clone)]
pub struct Slot {
    pub generation: u32,
    pub body: Option<Body>,
}

/// Simulation state: the body table and the current time `t`.
///
/// Slot order is insertion order and stays stable across steps, which keeps
/// pair iteration (and therefore the whole step) deterministic.
#[derive(Debug, Clone)]
pub struct System {
    pub slots: Vec<Slot>,
    pub free: Vec<u32>, // indices of empty slots, reused on insert
    pub t: f64, // time
}

impl System {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            t: 0.0,
        }
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a body, reusing a free slot when one is available.
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            BodyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            BodyHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Remove the body behind `handle`. The slot generation is bumped so the
    /// handle (and every copy of it) goes stale immediately.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let body = slot.body.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Iterate live bodies with their slot index, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Body)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.body.as_ref().map(|b| (i, b)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut Body)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.body.as_mut().map(|b| (i, b)))
    }

    /// Mutable access to two distinct live slots at once, for pairwise
    /// contact resolution. Requires `i < j`; returns `None` if either slot
    /// is empty or out of range.
    pub fn pair_mut(&mut self, i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
        if i >= j || j >= self.slots.len() {
            return None;
        }
        let (lo, hi) = self.slots.split_at_mut(j);
        match (lo[i].body.as_mut(), hi[0].body.as_mut()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
