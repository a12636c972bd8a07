//! A deterministic, single-process match world for exercising whole teams
//! of agents: implements the sensing/actuation/shared-array contracts,
//! runs agents in stable id order, and isolates any per-turn fault to the
//! turn it happened in.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod runner;
pub mod scenario;
pub mod world;

pub use runner::{Match, MatchReport};
pub use scenario::Scenario;
pub use world::{AgentHandle, SimWorld};
