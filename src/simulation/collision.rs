//! Circle-circle collision detection and resolution
//!
//! Detection runs in two phases:
//! - broad phase: a [`BroadPhase`] produces candidate slot pairs; the
//!   default [`BruteForce`] emits every unordered pair, O(n^2) but fine at
//!   this scale and swappable for a spatial index behind the same trait
//! - narrow phase: [`find_contacts`] keeps the pairs whose circles overlap
//!
//! Resolution applies a restitution impulse along the contact normal, then a
//! positional correction that bleeds off interpenetration, both split by
//! inverse mass so static bodies never move

use super::params::Parameters;
use super::states::{NVec2, System};

/// A detected overlap between the bodies in slots `i` and `j`
#[derive(Debug, Clone)]
pub struct Contact {
    pub i: usize, // slot index of the first body
    pub j: usize, // slot index of the second body
    pub normal: NVec2, // unit contact normal, points from i toward j
    pub depth: f64, // penetration depth, meters
}

/// Candidate-pair source for collision detection
///
/// The narrow phase only checks what the broad phase emits, so a spatial
/// index can replace [`BruteForce`] without touching the solver
pub trait BroadPhase {
    /// Slot index pairs (i < j) worth a narrow-phase check
    fn candidate_pairs(&self, sys: &System) -> Vec<(usize, usize)>;
}

/// Broad phase that emits every unordered pair of live bodies
pub struct BruteForce;

impl BroadPhase for BruteForce {
    fn candidate_pairs(&self, sys: &System) -> Vec<(usize, usize)> {
        let live: Vec<usize> = sys.iter().map(|(i, _)| i).collect();

        // Every unordered pair (i, j) with i < j, in slot order
        let mut pairs = Vec::new();
        for (k, &i) in live.iter().enumerate() {
            for &j in &live[k + 1..] {
                pairs.push((i, j));
            }
        }
        pairs
    }
}

/// Narrow phase: keep the candidate pairs whose circles actually overlap
///
/// A pair collides iff `|x_j - x_i| < r_i + r_j`; the penetration depth is
/// the difference. Exactly coincident centers have no meaningful normal, so
/// the +x axis is used as a fixed separation axis instead of dividing by
/// zero
pub fn find_contacts(sys: &System, pairs: &[(usize, usize)]) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for &(i, j) in pairs {
        // Tolerate stale or out-of-range pairs from a custom broad phase
        let (Some(bi), Some(bj)) = (
            sys.slots.get(i).and_then(|s| s.body.as_ref()),
            sys.slots.get(j).and_then(|s| s.body.as_ref()),
        ) else {
            continue;
        };

        let r_sum = bi.radius + bj.radius;

        // delta points from i toward j
        let delta = bj.x - bi.x;
        let dist2 = delta.norm_squared();
        if dist2 >= r_sum * r_sum {
            continue; // separated
        }

        let dist = dist2.sqrt();
        let normal = if dist > 0.0 {
            delta / dist
        } else {
            NVec2::new(1.0, 0.0) // coincident centers, fixed fallback axis
        };

        contacts.push(Contact {
            i,
            j,
            normal,
            depth: r_sum - dist,
        });
    }
    contacts
}

/// Resolve every contact in order: a restitution impulse along the normal,
/// then a positional correction proportional to inverse mass
pub fn resolve_contacts(sys: &mut System, contacts: &[Contact], params: &Parameters) {
    for c in contacts {
        let Some((bi, bj)) = sys.pair_mut(c.i, c.j) else {
            continue;
        };

        let inv_i = bi.inv_mass();
        let inv_j = bj.inv_mass();
        let inv_sum = inv_i + inv_j;
        if inv_sum == 0.0 { // two static bodies, nothing can move
            continue;
        }

        let n = c.normal;

        // Relative velocity along the normal. Positive means the pair is
        // already separating and gets no impulse
        let v_rel = (bj.v - bi.v).dot(&n);
        if v_rel < 0.0 {
            // The pair bounces with the softer of the two restitutions
            let e = bi.restitution.min(bj.restitution);

            // Impulse magnitude: j_n = -(1 + e) * v_rel / (1/m_i + 1/m_j)
            let jn = -(1.0 + e) * v_rel / inv_sum;

            // Equal and opposite along the normal
            bi.v -= jn * inv_i * n;
            bj.v += jn * inv_j * n;
        }

        // Positional correction: remove a fraction of the overlap beyond the
        // slop, split by inverse mass so heavier bodies move less
        let corr = (c.depth - params.penetration_slop).max(0.0) * params.position_correction;
        if corr > 0.0 {
            let shift = n * (corr / inv_sum);
            bi.x -= shift * inv_i;
            bj.x += shift * inv_j;
        }
    }
}
