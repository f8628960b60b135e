//! Prelude module - common imports for result chains
//!
//! Import this module to get the chain type and its step helpers:
//! ```rust
//! use monad_core::prelude::*;
//!
//! let doubled: Result<i32> = Result::success(21).bind(lift(|x: i32| x.saturating_mul(2)));
//! assert_eq!(doubled.into_std(), Ok(42));
//! ```

pub use crate::functional::{boxed, compose, lift, try_lift};
pub use crate::{Effect, Error, ExpectedFailure, Result, Step, attempt};
