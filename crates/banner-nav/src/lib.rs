//! Navigation for a movement budget of one step at a time: a hybrid
//! greedy/perimeter engine, a lazily-built return-path map, and random
//! exploration targeting. No global pathfinding; every routine advances by
//! unit steps using only local passability queries.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod explore;
pub mod hybrid;
pub mod spawn_map;

pub use explore::Explorer;
pub use hybrid::{HybridNav, NavOutcome};
pub use spawn_map::{PathCell, ReturnMap};
