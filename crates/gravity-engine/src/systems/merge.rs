//! Collision detection and inelastic merging.
//!
//! Runs after integration. Pairs are scanned backward (outer index from the
//! end, inner index below it) over stable indices; absorbed bodies are only
//! flagged during the scan and compacted away afterwards, so removals never
//! shift an index mid-scan. A survivor keeps scanning with its grown mass and
//! radius. An absorbed body is out of play for the rest of the tick.

use crate::api::types::BodyId;
use crate::components::body::Body;

/// Record of one merge, for logging and the event stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent {
    pub survivor: BodyId,
    pub absorbed: BodyId,
    /// Survivor mass after the merge.
    pub mass: f64,
    /// Survivor radius after the merge.
    pub radius: f64,
}

/// Mutable survivor and shared absorbed body from the same slice.
fn pair_mut(bodies: &mut [Body], survivor: usize, absorbed: usize) -> (&mut Body, &Body) {
    if survivor < absorbed {
        let (lo, hi) = bodies.split_at_mut(absorbed);
        (&mut lo[survivor], &hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(survivor);
        (&mut hi[0], &lo[absorbed])
    }
}

/// Merge resolver with a reusable absorbed mask.
#[derive(Debug, Default)]
pub struct MergeResolver {
    /// Bodies absorbed so far this tick.
    absorbed: Vec<bool>,
}

impl MergeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge every overlapping pair, removing absorbed bodies from `bodies`.
    /// Appends one event per merge to `events` and returns the merge count.
    ///
    /// The heavier body of a pair survives; on equal mass the outer (higher
    /// index) body does. When the inner body wins, the outer one is gone and
    /// the scan moves on to the next outer index.
    pub fn resolve(&mut self, bodies: &mut Vec<Body>, events: &mut Vec<MergeEvent>) -> usize {
        let n = bodies.len();
        self.absorbed.clear();
        self.absorbed.resize(n, false);
        let mut merges = 0;

        for i in (0..n).rev() {
            if self.absorbed[i] {
                continue;
            }
            for j in (0..i).rev() {
                if self.absorbed[j] || !bodies[i].overlaps(&bodies[j]) {
                    continue;
                }
                let (s, a) = if bodies[i].mass() >= bodies[j].mass() {
                    (i, j)
                } else {
                    (j, i)
                };
                let (survivor, absorbed) = pair_mut(bodies, s, a);
                survivor.absorb(absorbed);
                log::debug!(
                    "merge: {} absorbed {} (mass {:.1}, radius {:.2})",
                    survivor.id(),
                    absorbed.id(),
                    survivor.mass(),
                    survivor.radius()
                );
                events.push(MergeEvent {
                    survivor: survivor.id(),
                    absorbed: absorbed.id(),
                    mass: survivor.mass(),
                    radius: survivor.radius(),
                });
                self.absorbed[a] = true;
                merges += 1;
                if a == i {
                    break;
                }
            }
        }

        if merges > 0 {
            let absorbed = &self.absorbed;
            let mut idx = 0;
            bodies.retain(|_| {
                let keep = !absorbed[idx];
                idx += 1;
                keep
            });
        }
        merges
    }
}
