//! Umbrella crate that re-exports the `banner-*` building blocks.
//!
//! This crate is intended as a convenient entrypoint: depend on `banner-ai`
//! with the default features and get the whole stack, or trim features down
//! to just the primitives you embed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use banner_core as core;

#[cfg(feature = "know")]
#[cfg_attr(docsrs, doc(cfg(feature = "know")))]
pub use banner_know as know;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use banner_nav as nav;

#[cfg(feature = "bot")]
#[cfg_attr(docsrs, doc(cfg(feature = "bot")))]
pub use banner_bot as bot;

#[cfg(feature = "sim")]
#[cfg_attr(docsrs, doc(cfg(feature = "sim")))]
pub use banner_sim as sim;
