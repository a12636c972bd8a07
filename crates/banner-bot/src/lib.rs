//! The per-agent decision layer: one context object owning all mutable
//! agent state, driven once per turn against the world-access traits.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod combat;
mod context;
mod turn;

pub use context::BotContext;
