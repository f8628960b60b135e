//! Helpers for building chain steps out of plain functions.

use crate::result::{Result, Step};

/// Turn an infallible transform into a step.
pub fn lift<T, E, F>(transform: F) -> impl FnOnce(T) -> Result<T, E>
where
    F: FnOnce(T) -> T,
{
    move |value| Result::success(transform(value))
}

/// Turn a `std` fallible transform into a step.
pub fn try_lift<T, E, F>(transform: F) -> impl FnOnce(T) -> Result<T, E>
where
    F: FnOnce(T) -> std::result::Result<T, E>,
{
    move |value| Result::from(transform(value))
}

/// Run `first`, then `second` on its payload.
pub fn compose<T, E, F, G>(first: F, second: G) -> impl FnOnce(T) -> Result<T, E>
where
    F: FnOnce(T) -> Result<T, E>,
    G: FnOnce(T) -> Result<T, E>,
{
    move |value| first(value).bind(second)
}

/// Box a step so it can share a [`Result::chain`] call with other closures.
pub fn boxed<T, E, F>(step: F) -> Step<T, E>
where
    F: FnOnce(T) -> Result<T, E> + 'static,
{
    Box::new(step)
}
