//! Shared handles to resources that a chain closes in a deferred cleanup.
//!
//! A [`Handle`] is cheap to clone, so a payload snapshot taken by
//! [`monad_core::Result::defer`] points at the same resource later steps use.
//! Closing through any clone closes it for all of them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use monad_core::Error;
use tracing::debug;

/// A named, single-threaded shared resource that can be closed once.
pub struct Handle<R> {
    name: Rc<str>,
    resource: Rc<RefCell<Option<R>>>,
}

impl<R> Handle<R> {
    /// Wrap an open resource.
    pub fn new(name: impl Into<Rc<str>>, resource: R) -> Self {
        Self {
            name: name.into(),
            resource: Rc::new(RefCell::new(Some(resource))),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the resource has not been closed yet.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.resource
            .try_borrow()
            .map(|slot| slot.is_some())
            .unwrap_or(true)
    }

    /// Run `f` with exclusive access to the open resource.
    ///
    /// # Errors
    ///
    /// Returns `Error::HandleClosed` if the handle was closed, or
    /// `Error::Unknown` if the resource is already borrowed.
    pub fn with_mut<U, F>(&self, f: F) -> Result<U, Error>
    where
        F: FnOnce(&mut R) -> U,
    {
        let mut slot = self
            .resource
            .try_borrow_mut()
            .map_err(|_| Error::Unknown(format!("handle '{}' is already in use", self.name)))?;

        slot.as_mut()
            .map(f)
            .ok_or_else(|| Error::handle_closed(self.name.as_ref()))
    }

    /// Take the resource out of the handle, leaving it closed.
    ///
    /// Returns `None` when the handle was already closed or is in use.
    pub fn close(&self) -> Option<R> {
        let taken = self
            .resource
            .try_borrow_mut()
            .ok()
            .and_then(|mut slot| slot.take());

        if taken.is_some() {
            debug!(handle = %self.name, "closed handle");
        }
        taken
    }
}

impl<R> Clone for Handle<R> {
    fn clone(&self) -> Self {
        Self {
            name: Rc::clone(&self.name),
            resource: Rc::clone(&self.resource),
        }
    }
}

impl<R> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_clones_share_resource() {
        let handle = Handle::new("buffer", Vec::<u8>::new());
        let other = handle.clone();

        other.with_mut(|buf| buf.extend_from_slice(b"abc")).unwrap();

        assert_eq!(handle.with_mut(|buf| buf.len()).unwrap(), 3);
    }

    #[test]
    fn test_close_is_shared_and_once() {
        let handle = Handle::new("buffer", vec![1u8]);
        let other = handle.clone();

        assert_eq!(other.close(), Some(vec![1u8]));
        assert_eq!(handle.close(), None);
        assert!(!handle.is_open());
    }

    #[test]
    fn test_use_after_close_fails() {
        let handle = Handle::new("output file", 0u8);
        let _ = handle.close();

        assert_eq!(
            handle.with_mut(|_| ()),
            Err(Error::handle_closed("output file"))
        );
    }

    #[test]
    fn test_nested_access_is_an_error() {
        let handle = Handle::new("buffer", 0u8);
        let inner = handle.clone();

        let nested = handle.with_mut(|_| inner.with_mut(|_| ())).unwrap();

        assert!(matches!(nested, Err(Error::Unknown(_))));
    }

    #[test]
    fn test_debug_reports_state() {
        let handle = Handle::new("response body", ());
        assert!(format!("{handle:?}").contains("open: true"));
    }
}
