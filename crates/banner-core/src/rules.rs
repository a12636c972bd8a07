#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment constants for one match.
///
/// Defaults mirror the observed game environment; the simulator and tests
/// override individual fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rules {
    pub map_width: i32,
    pub map_height: i32,
    /// Squared vision radius of every agent.
    pub vision_radius_squared: i32,
    /// Squared attack/heal reach.
    pub action_radius_squared: i32,
    /// Rounds before flag captures (and carry-home moves) are allowed.
    pub setup_rounds: u32,
    /// Rounds a dropped flag waits before resetting to its default site.
    pub flag_dropped_reset_rounds: u32,
    /// Additional reset rounds granted by the capture upgrade.
    pub capture_upgrade_reset_bonus: u32,
    /// Positional noise radius on broadcast flag locations.
    pub broadcast_noise_radius: i32,
    /// Flags per team. The shared flag table holds exactly this many records.
    pub flags_per_team: u16,
    pub max_health: i32,
    /// Damage dealt by an explosive trap to the agent stepping on it.
    pub explosive_trap_damage: i32,
    /// Number of words in the team shared array.
    pub shared_array_len: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            map_width: 60,
            map_height: 60,
            vision_radius_squared: 20,
            action_radius_squared: 4,
            setup_rounds: 200,
            flag_dropped_reset_rounds: 4,
            capture_upgrade_reset_bonus: 8,
            broadcast_noise_radius: 10,
            flags_per_team: 3,
            max_health: 1000,
            explosive_trap_damage: 750,
            shared_array_len: 64,
        }
    }
}

impl Rules {
    /// Effective drop-reset threshold for this turn.
    ///
    /// Must be recomputed every turn from the currently-held upgrades before
    /// any reconciliation comparison uses it.
    pub fn drop_reset_rounds(&self, has_capture_upgrade: bool) -> u32 {
        if has_capture_upgrade {
            self.flag_dropped_reset_rounds + self.capture_upgrade_reset_bonus
        } else {
            self.flag_dropped_reset_rounds
        }
    }
}
