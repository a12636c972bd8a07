//! Layout and protocol for the team shared array.
//!
//! The array is plain `u16` words visible to every agent on the team. Two
//! sub-protocols live in it: a single assistance beacon in four fixed slots,
//! and a flag table of three-word records, one per enemy flag. Writers never
//! block; conflicts resolve by round number and beacon priority. A reader
//! may observe words from two different writes of one logical record; that
//! torn read is accepted as rare and self-correcting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use banner_core::{AgentView, AgentWorld, Loc, ProtocolError};

pub const ASSIST_X_SLOT: usize = 0;
pub const ASSIST_Y_SLOT: usize = 1;
pub const ASSIST_ROUND_SLOT: usize = 2;
pub const ASSIST_KIND_SLOT: usize = 3;

/// First slot of the flag table; records are [id, packed loc, round].
pub const FLAG_TABLE_BASE: usize = ASSIST_KIND_SLOT + 1;
pub const FLAG_RECORD_WORDS: usize = 3;

/// A beacon older than this many rounds is ignored.
pub const ASSIST_EXPIRATION_ROUNDS: u32 = 10;
/// Squared distance within which an agent will answer a beacon.
pub const ASSIST_RESPONSE_RADIUS_SQUARED: i32 = 20 * 20;

/// Why an agent is calling for assistance. Lower wire value = higher
/// priority; a fresh higher-priority call pre-empts a lower one within the
/// same round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssistKind {
    CarryingEnemyFlag,
    FlagUnderAttack,
    EnemyNearOwnFlag,
}

impl AssistKind {
    pub const fn word(self) -> u16 {
        match self {
            AssistKind::CarryingEnemyFlag => 1,
            AssistKind::FlagUnderAttack => 2,
            AssistKind::EnemyNearOwnFlag => 3,
        }
    }

    pub const fn from_word(word: u16) -> Option<AssistKind> {
        match word {
            1 => Some(AssistKind::CarryingEnemyFlag),
            2 => Some(AssistKind::FlagUnderAttack),
            3 => Some(AssistKind::EnemyNearOwnFlag),
            _ => None,
        }
    }

    /// Strictly higher priority than `other`.
    pub const fn outranks(self, other: AssistKind) -> bool {
        self.word() < other.word()
    }
}

/// The decoded assistance beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Beacon {
    pub at: Loc,
    pub round: u32,
    pub kind: AssistKind,
}

impl Beacon {
    /// Whether an agent at `from` on round `round` should still act on this
    /// beacon.
    pub fn is_actionable(&self, round: u32, from: Loc) -> bool {
        round.saturating_sub(self.round) < ASSIST_EXPIRATION_ROUNDS
            && from.distance_squared(self.at) < ASSIST_RESPONSE_RADIUS_SQUARED
    }
}

/// Read the beacon, if one was ever published. Round zero is the
/// never-written sentinel.
pub fn read_beacon(world: &impl AgentView) -> Option<Beacon> {
    let round = world.read_slot(ASSIST_ROUND_SLOT) as u32;
    if round == 0 {
        return None;
    }
    let kind = AssistKind::from_word(world.read_slot(ASSIST_KIND_SLOT))?;
    Some(Beacon {
        at: Loc::new(
            world.read_slot(ASSIST_X_SLOT) as i32,
            world.read_slot(ASSIST_Y_SLOT) as i32,
        ),
        round,
        kind,
    })
}

/// Publish a call for assistance.
///
/// The stored record is overwritten only when it is from an earlier round,
/// or when the new kind outranks the stored one. Equal round and equal or
/// better stored priority keeps the first writer's record.
pub fn publish_assistance(world: &mut impl AgentWorld, at: Loc, kind: AssistKind) {
    let stored_round = world.read_slot(ASSIST_ROUND_SLOT) as u32;
    let stored_kind = world.read_slot(ASSIST_KIND_SLOT);
    if stored_round < world.round() || stored_kind > kind.word() {
        let round = world.round();
        world.write_slot(ASSIST_X_SLOT, at.x as u16);
        world.write_slot(ASSIST_Y_SLOT, at.y as u16);
        world.write_slot(ASSIST_ROUND_SLOT, round as u16);
        world.write_slot(ASSIST_KIND_SLOT, kind.word());
    }
}

/// Pack an in-bounds cell into one shared word.
pub fn pack_loc(at: Loc) -> Result<u16, ProtocolError> {
    if at.x < 0 || at.y < 0 || at.x >= (1 << 8) || at.y >= (1 << 8) {
        return Err(ProtocolError::UnencodableLocation { at });
    }
    Ok(((at.x as u16) << 8) | at.y as u16)
}

/// Inverse of [`pack_loc`].
pub fn unpack_loc(word: u16) -> Loc {
    Loc::new((word >> 8) as i32, (word & 0xFF) as i32)
}

/// One flag-table record as stored in the shared array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlagRecord {
    pub flag_id: u16,
    pub at: Loc,
    pub round: u32,
}

pub const fn flag_slot_base(index: usize) -> usize {
    FLAG_TABLE_BASE + index * FLAG_RECORD_WORDS
}

/// Read table record `index`; `None` when the slot is empty (id zero).
pub fn read_flag_record(world: &impl AgentView, index: usize) -> Option<FlagRecord> {
    let base = flag_slot_base(index);
    let flag_id = world.read_slot(base);
    if flag_id == 0 {
        return None;
    }
    Some(FlagRecord {
        flag_id,
        at: unpack_loc(world.read_slot(base + 1)),
        round: world.read_slot(base + 2) as u32,
    })
}

pub fn write_flag_record(
    world: &mut impl AgentWorld,
    index: usize,
    record: FlagRecord,
) -> Result<(), ProtocolError> {
    let base = flag_slot_base(index);
    let packed = pack_loc(record.at)?;
    world.write_slot(base, record.flag_id);
    world.write_slot(base + 1, packed);
    world.write_slot(base + 2, record.round as u16);
    Ok(())
}
