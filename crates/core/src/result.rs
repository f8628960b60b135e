//! Result chains with deferred cleanups for Railway-Oriented Programming.
//!
//! A [`Result`] is either a success payload or a failure, plus an ordered list
//! of cleanups registered while the chain was still succeeding. Steps are
//! composed with [`Result::bind`] and [`Result::chain`]; once a step fails,
//! every later step is skipped. Cleanups never run on their own: the terminal
//! [`Result::resolve`] runs all of them, in registration order, whether the
//! chain failed or not.
//!
//! # Examples
//!
//! ```
//! use monad_core::Result;
//!
//! fn greet(name: String) -> Result<String> {
//!     Result::success(format!("hello, {name}"))
//! }
//!
//! fn uppercase(text: String) -> Result<String> {
//!     Result::success(text.to_uppercase())
//! }
//!
//! let shout = Result::success("world".to_string()).chain([greet, uppercase]);
//! assert_eq!(shout.payload().map(String::as_str), Some("HELLO, WORLD"));
//! assert!(shout.resolve().is_ok());
//! ```

use std::fmt;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::error::{Error, ExpectedFailure};

type Cleanup = Box<dyn FnOnce()>;

/// A boxed chain step, for mixing closures of different types in one
/// [`Result::chain`] call.
pub type Step<T, E = Error> = Box<dyn FnOnce(T) -> Result<T, E>>;

/// A chain without payload: only failure state and cleanups.
pub type Effect<E = Error> = Result<(), E>;

/// A success payload or a failure, plus cleanups pending until
/// [`Result::resolve`].
///
/// Dropping a `Result` without resolving it discards its cleanups without
/// running them.
#[must_use = "pending cleanups only run when the chain is resolved"]
pub struct Result<T, E = Error> {
    outcome: std::result::Result<T, E>,
    cleanups: Vec<Cleanup>,
}

impl<T, E> Result<T, E> {
    /// A succeeding chain carrying `value`.
    pub const fn success(value: T) -> Self {
        Self {
            outcome: Ok(value),
            cleanups: Vec::new(),
        }
    }

    /// A failed chain carrying `err`.
    pub const fn failure(err: E) -> Self {
        Self {
            outcome: Err(err),
            cleanups: Vec::new(),
        }
    }

    /// Lift a `(value, error)` pair: any error wins over the value.
    pub fn new(value: T, err: Option<E>) -> Self {
        match err {
            Some(err) => Self::failure(err),
            None => Self::success(value),
        }
    }

    /// Run `step` on the payload, keeping every cleanup registered so far.
    ///
    /// A failed chain is returned as is and `step` is never called. Cleanups
    /// registered by the result of `step` are appended after the existing
    /// ones, including when `step` fails.
    pub fn bind<F>(self, step: F) -> Self
    where
        F: FnOnce(T) -> Self,
    {
        let Self {
            outcome,
            mut cleanups,
        } = self;

        match outcome {
            Err(err) => {
                trace!("chain already failed, skipping step");
                Self {
                    outcome: Err(err),
                    cleanups,
                }
            }
            Ok(value) => {
                let next = step(value);
                cleanups.extend(next.cleanups);
                Self {
                    outcome: next.outcome,
                    cleanups,
                }
            }
        }
    }

    /// Bind each step in turn, stopping at the first failure.
    ///
    /// Steps after the failing one are neither called nor pulled from the
    /// iterator.
    pub fn chain<I, F>(self, steps: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(T) -> Self,
    {
        if self.is_failure() {
            return self;
        }

        let flow = steps.into_iter().try_fold(self, |acc, step| {
            let next = acc.bind(step);
            if next.is_failure() {
                ControlFlow::Break(next)
            } else {
                ControlFlow::Continue(next)
            }
        });

        match flow {
            ControlFlow::Continue(result) | ControlFlow::Break(result) => result,
        }
    }

    /// Register a cleanup that receives the payload as it is right now.
    ///
    /// The payload is cloned at registration, so later steps that replace it
    /// do not change what `cleanup` receives. On a failed chain `cleanup` is
    /// dropped without ever being called.
    pub fn defer<F>(self, cleanup: F) -> Self
    where
        T: Clone + 'static,
        F: FnOnce(T) + 'static,
    {
        match self.payload().cloned() {
            None => self,
            Some(snapshot) => self.push_cleanup(Box::new(move || cleanup(snapshot))),
        }
    }

    /// Register a cleanup that takes no payload.
    ///
    /// Same rules as [`Result::defer`]: ignored once the chain has failed.
    pub fn defer_fn<F>(self, cleanup: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        if self.is_failure() {
            return self;
        }
        self.push_cleanup(Box::new(cleanup))
    }

    /// Run every pending cleanup, then report the failure, if any.
    ///
    /// # Errors
    ///
    /// Returns the failure carried by the chain.
    pub fn resolve(self) -> std::result::Result<(), E> {
        self.into_std().map(|_| ())
    }

    /// Run every pending cleanup, then hand back the payload or the failure.
    ///
    /// # Errors
    ///
    /// Returns the failure carried by the chain.
    pub fn into_std(self) -> std::result::Result<T, E> {
        let Self { outcome, cleanups } = self;

        if !cleanups.is_empty() {
            debug!(count = cleanups.len(), "running deferred cleanups");
        }
        cleanups.into_iter().for_each(|cleanup| cleanup());

        outcome
    }

    /// Invert the chain for operations that are required to fail.
    ///
    /// A succeeding chain becomes a failure carrying the
    /// [`ExpectedFailure`] sentinel; a failed chain becomes a success carrying
    /// `T::default()`. Pending cleanups are kept.
    pub fn on_error(self) -> Self
    where
        T: Default,
        E: ExpectedFailure,
    {
        let Self { outcome, cleanups } = self;
        let outcome = match outcome {
            Ok(_) => Err(E::failure_expected()),
            Err(_) => Ok(T::default()),
        };
        Self { outcome, cleanups }
    }

    /// Call `handler` with the failure, if there is one, and pass the chain on.
    pub fn on_error_handler<F>(self, handler: F) -> Self
    where
        F: FnOnce(&E),
    {
        if let Err(ref err) = self.outcome {
            handler(err);
        }
        self
    }

    /// Whether no step has failed so far.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Whether some step has failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }

    /// The current payload; `None` once the chain has failed.
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    /// The carried failure, without running cleanups.
    #[must_use]
    pub fn failure_value(&self) -> Option<&E> {
        self.outcome.as_ref().err()
    }

    /// Number of cleanups waiting for [`Result::resolve`].
    #[must_use]
    pub fn pending_cleanups(&self) -> usize {
        self.cleanups.len()
    }

    fn push_cleanup(mut self, cleanup: Cleanup) -> Self {
        self.cleanups.push(cleanup);
        self
    }
}

impl<T, E> From<std::result::Result<T, E>> for Result<T, E> {
    fn from(outcome: std::result::Result<T, E>) -> Self {
        Self {
            outcome,
            cleanups: Vec::new(),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Result<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Result")
            .field("outcome", &self.outcome)
            .field("pending_cleanups", &self.cleanups.len())
            .finish()
    }
}

/// Run `op` unconditionally and lift its outcome into a chain.
pub fn attempt<T, E, F>(op: F) -> Result<T, E>
where
    F: FnOnce() -> std::result::Result<T, E>,
{
    Result::from(op())
}
