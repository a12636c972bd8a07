//! Team knowledge: the shared-array consensus protocol, per-agent flag
//! memory, broadcast possibility tracking, and the per-turn observation
//! snapshot.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod broadcast;
pub mod flags;
pub mod observation;
pub mod shared;

pub use broadcast::BroadcastTracker;
pub use flags::{FlagMemory, FlagSighting, SIGHTING_RECENCY_ROUNDS};
pub use observation::Observation;
pub use shared::{
    pack_loc, publish_assistance, read_beacon, unpack_loc, AssistKind, Beacon,
    ASSIST_EXPIRATION_ROUNDS, ASSIST_RESPONSE_RADIUS_SQUARED,
};
