//! Deterministic, engine-agnostic primitives for a turn-based grid agent.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;
pub mod rng;
pub mod rules;
pub mod world;

pub use error::ProtocolError;
pub use grid::{Direction, Loc, ADJACENT_DISTANCE_SQUARED, INF};
pub use rng::{derive_seed, mix64, DeterministicRng, SplitMix64};
pub use rules::Rules;
pub use world::{AgentInfo, AgentView, AgentWorld, FlagInfo, Team, TrapKind};
