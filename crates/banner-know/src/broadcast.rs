use std::collections::BTreeMap;

use banner_core::{AgentView, Loc, INF};

/// Squared distance at which an agent has certainly had direct vision of a
/// broadcast candidate and can rule it out.
pub const CONFIRMATION_RADIUS_SQUARED: i32 = 6;

/// Tracks approximate enemy-objective locations reported by the wide-radius
/// noisy broadcast, and rules candidates out as the agent gets close enough
/// to disprove them. Elimination is monotone: a candidate never comes back.
#[derive(Debug, Clone, Default)]
pub struct BroadcastTracker {
    /// Candidate location -> eliminated. BTreeMap so nearest-candidate ties
    /// break deterministically.
    candidates: BTreeMap<Loc, bool>,
    latest: Vec<Loc>,
    nearest: Option<Loc>,
}

impl BroadcastTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this turn's broadcast report in and recompute the nearest
    /// non-eliminated candidate.
    pub fn ingest(&mut self, from: Loc, broadcasts: &[Loc]) {
        for &at in broadcasts {
            self.candidates.entry(at).or_insert(false);
        }
        self.latest.clear();
        self.latest.extend_from_slice(broadcasts);

        self.nearest = None;
        let mut best = INF;
        for (&at, &eliminated) in &self.candidates {
            if eliminated {
                continue;
            }
            let dist = from.distance_squared(at);
            if dist < best {
                self.nearest = Some(at);
                best = dist;
            }
        }
    }

    /// Try to rule out the current nearest candidate. Idempotent within a
    /// turn: repeated calls without a new [`ingest`](Self::ingest) leave the
    /// eliminated set unchanged.
    pub fn check_elimination(&mut self, world: &impl AgentView, noise_radius: i32) {
        let Some(nearest) = self.nearest else {
            return;
        };
        if self.candidates.get(&nearest).copied().unwrap_or(false) {
            return;
        }

        // Still plausible only while some fresh broadcast corroborates it.
        let mut possible = self
            .latest
            .iter()
            .any(|b| nearest.distance_squared(*b) <= 4 * noise_radius);

        if world.location().distance_squared(nearest) <= CONFIRMATION_RADIUS_SQUARED {
            let enemy = world.team().opponent();
            let sees_enemy_flag = world.visible_flags().iter().any(|f| f.team == enemy);
            if !sees_enemy_flag {
                possible = false;
            }
        }

        if !possible {
            self.candidates.insert(nearest, true);
        }
    }

    /// The candidate chosen at the last ingest. May have been eliminated
    /// later the same turn; the next ingest moves on.
    pub fn nearest_candidate(&self) -> Option<Loc> {
        self.nearest
    }

    pub fn is_eliminated(&self, at: Loc) -> bool {
        self.candidates.get(&at).copied().unwrap_or(false)
    }

    pub fn eliminated_count(&self) -> usize {
        self.candidates.values().filter(|e| **e).count()
    }
}
