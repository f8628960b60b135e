//! # monad-core
//!
//! Result chains with deferred cleanups - strictly functional Rust with zero unwraps.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Chains
//!
//! A [`Result`] carries a payload or a failure plus pending cleanups:
//! - [`Result::bind`] and [`Result::chain`] compose fallible steps and stop at
//!   the first failure
//! - [`Result::defer`] registers a cleanup while the chain still succeeds
//! - [`Result::resolve`] runs every cleanup once, in order, then reports the
//!   failure

mod error;
pub mod functional;
pub mod prelude;
mod result;

pub use error::{Error, ExpectedFailure};
pub use result::{Effect, Result, Step, attempt};
