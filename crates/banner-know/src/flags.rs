#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use banner_core::{AgentView, AgentWorld, FlagInfo, Loc, ProtocolError, INF};

use crate::shared::{read_flag_record, write_flag_record, FlagRecord};

/// A sighting older than this many rounds no longer drives navigation.
pub const SIGHTING_RECENCY_ROUNDS: u32 = 20;

/// One agent's record of an enemy flag: where it was, when it was first
/// seen at that spot, and when it was last confirmed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagSighting {
    pub flag_id: u16,
    pub at: Loc,
    pub first_seen: u32,
    pub last_seen: u32,
}

/// Per-agent memory of enemy flag sightings.
///
/// Sightings are inserted on first contact and updated in place afterwards;
/// nothing is ever removed. Staleness is judged at query time against
/// [`SIGHTING_RECENCY_ROUNDS`].
#[derive(Debug, Clone, Default)]
pub struct FlagMemory {
    sightings: Vec<FlagSighting>,
}

impl FlagMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sightings(&self) -> &[FlagSighting] {
        &self.sightings
    }

    /// Fold this turn's directly-sensed enemy flags into memory.
    ///
    /// A flag seen again at the same spot extends its `last_seen`; a flag
    /// seen somewhere new starts a fresh sighting episode (both rounds
    /// reset). Picked-up flags are ignored since they are about to move.
    pub fn record_sensed(&mut self, world: &impl AgentView, flags: &[FlagInfo]) {
        let round = world.round();
        let enemy = world.team().opponent();
        for flag in flags {
            if flag.team != enemy || flag.picked_up {
                continue;
            }
            if let Some(i) = self.sightings.iter().position(|s| s.flag_id == flag.id) {
                let sighting = &mut self.sightings[i];
                if sighting.at == flag.at {
                    sighting.last_seen = round;
                } else {
                    sighting.at = flag.at;
                    sighting.first_seen = round;
                    sighting.last_seen = round;
                }
            } else {
                self.sightings.push(FlagSighting {
                    flag_id: flag.id,
                    at: flag.at,
                    first_seen: round,
                    last_seen: round,
                });
            }
        }
    }

    /// Reconcile local memory with the shared flag table.
    ///
    /// For each published record: a newer shared round is adopted locally; a
    /// local sighting fresher than the published round by at least
    /// `2 + drop_reset_rounds` overwrites the slot; an identity we have
    /// never seen is adopted as a new sighting. Afterwards, any local
    /// sighting missing from the table is written to the first empty slot.
    /// The table holds one slot per enemy flag, so a full table with an
    /// unpublished sighting is a layout invariant violation.
    pub fn sync_shared(
        &mut self,
        world: &mut impl AgentWorld,
        flags_per_team: u16,
        drop_reset_rounds: u32,
    ) -> Result<(), ProtocolError> {
        let slots = flags_per_team as usize;

        for index in 0..slots {
            let Some(record) = read_flag_record(world, index) else {
                continue;
            };
            if let Some(i) = self
                .sightings
                .iter()
                .position(|s| s.flag_id == record.flag_id)
            {
                let sighting = &mut self.sightings[i];
                if record.round > sighting.last_seen {
                    sighting.at = record.at;
                    sighting.last_seen = record.round;
                } else if sighting.last_seen > record.round
                    && sighting.last_seen - record.round >= 2 + drop_reset_rounds
                {
                    let fresher = FlagRecord {
                        flag_id: sighting.flag_id,
                        at: sighting.at,
                        round: sighting.last_seen,
                    };
                    write_flag_record(world, index, fresher)?;
                }
            } else {
                self.sightings.push(FlagSighting {
                    flag_id: record.flag_id,
                    at: record.at,
                    first_seen: record.round,
                    last_seen: record.round,
                });
            }
        }

        for sighting in &self.sightings {
            let mut published = false;
            let mut first_empty = None;
            for index in 0..slots {
                match read_flag_record(world, index) {
                    Some(record) if record.flag_id == sighting.flag_id => {
                        published = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        if first_empty.is_none() {
                            first_empty = Some(index);
                        }
                    }
                }
            }
            if !published {
                let index = first_empty.ok_or(ProtocolError::SharedTableFull {
                    flag_id: sighting.flag_id,
                })?;
                write_flag_record(
                    world,
                    index,
                    FlagRecord {
                        flag_id: sighting.flag_id,
                        at: sighting.at,
                        round: sighting.last_seen,
                    },
                )?;
            }
        }

        Ok(())
    }

    /// Nearest sighting confirmed within the recency window; the navigation
    /// target of last resort.
    pub fn nearest_recent(&self, round: u32, from: Loc) -> Option<&FlagSighting> {
        let mut best = None;
        let mut best_dist = INF;
        for sighting in &self.sightings {
            if round.saturating_sub(sighting.last_seen) > SIGHTING_RECENCY_ROUNDS {
                continue;
            }
            let dist = from.distance_squared(sighting.at);
            if best.is_none() || dist < best_dist {
                best = Some(sighting);
                best_dist = dist;
            }
        }
        best
    }
}
