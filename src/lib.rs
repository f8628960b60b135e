#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

//! # monad
//!
//! Template renderer and installer. Both commands run as `monad_core` result
//! chains, so files and response bodies opened along the way are released
//! exactly once even when a later step fails.

pub mod cli;
pub mod config;
pub mod handle;
pub mod install;
pub mod template;

pub use monad_core;
