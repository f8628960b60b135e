//! Property-based tests for result chains.
//!
//! Uses proptest to validate:
//! - Resolving a success never reports a failure
//! - Resolving a failure reports exactly that failure
//! - Failed chains never call later steps and keep their cleanups
//! - Cleanups see the payload as it was when they were registered

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::arithmetic_side_effects)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use monad_core::{Error, Result, Step};
use proptest::prelude::*;

proptest! {
    /// Property: success always resolves clean
    #[test]
    fn prop_success_resolves_ok(value in any::<i64>()) {
        prop_assert_eq!(Result::<i64>::success(value).resolve(), Ok(()));
    }

    /// Property: failure resolves to the same failure
    #[test]
    fn prop_failure_resolves_to_itself(reason in "[a-zA-Z0-9 ]{0,40}") {
        let err = Error::Unknown(reason);
        prop_assert_eq!(Result::<i64>::failure(err.clone()).resolve(), Err(err));
    }

    /// Property: bind on a failed chain is a no-op
    #[test]
    fn prop_bind_short_circuits(cleanups in 0usize..6, reason in "[a-z]{1,20}") {
        let called = Rc::new(Cell::new(false));
        let seen = Rc::clone(&called);
        let err = Error::Unknown(reason);

        let start: Result<i64> = (0..cleanups)
            .fold(Result::success(0), |acc, _| acc.defer_fn(|| {}))
            .bind(|_| Result::failure(err.clone()));
        let after = start.bind(move |x| {
            seen.set(true);
            Result::success(x)
        });

        prop_assert!(!called.get());
        prop_assert_eq!(after.pending_cleanups(), cleanups);
        prop_assert_eq!(after.failure_value(), Some(&err));
    }

    /// Property: a chain runs exactly the steps up to and including the first failure
    #[test]
    fn prop_chain_stops_at_first_failure(len in 1usize..10, fail_at in 0usize..10) {
        let fail_at = fail_at % len;
        let calls = Rc::new(Cell::new(0usize));

        let steps: Vec<Step<usize>> = (0..len)
            .map(|index| {
                let calls = Rc::clone(&calls);
                Box::new(move |x: usize| {
                    calls.set(calls.get() + 1);
                    if index == fail_at {
                        Result::failure(Error::Unknown(format!("step {index}")))
                    } else {
                        Result::success(x + 1)
                    }
                }) as Step<usize>
            })
            .collect();

        let outcome = Result::success(0).chain(steps).resolve();

        prop_assert_eq!(calls.get(), fail_at + 1);
        prop_assert_eq!(outcome, Err(Error::Unknown(format!("step {fail_at}"))));
    }

    /// Property: cleanups get the registration-time payload, in order
    #[test]
    fn prop_cleanup_snapshots(values in prop::collection::vec(any::<i32>(), 1..8)) {
        let log = Rc::new(RefCell::new(Vec::new()));

        let result: Result<i32> = values.iter().fold(Result::success(0), |acc, &value| {
            let sink = Rc::clone(&log);
            acc.bind(move |_| Result::success(value))
                .defer(move |snapshot| sink.borrow_mut().push(snapshot))
        });
        prop_assert_eq!(result.payload().copied(), values.last().copied());

        prop_assert!(result.resolve().is_ok());
        prop_assert_eq!(log.borrow().clone(), values);
    }

    /// Property: on_error flips the outcome both ways
    #[test]
    fn prop_on_error_inverts(succeed in any::<bool>()) {
        let start: Result<u8> = if succeed {
            Result::success(1)
        } else {
            Result::failure(Error::Unknown("expected".into()))
        };
        let inverted = start.on_error();

        if succeed {
            prop_assert_eq!(inverted.failure_value(), Some(&Error::FailureExpected));
        } else {
            prop_assert!(inverted.is_success());
        }
    }
}
