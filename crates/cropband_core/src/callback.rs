//! Notification hooks the selection machine fires into its host.
//!
//! A [`Notifier`] is an optional boxed closure. Hosts that do not care about
//! an event simply leave the slot empty and emitting becomes a no-op.

use std::fmt;

/// Optional callback taking a single payload.
pub struct Notifier<T> {
    f: Option<Box<dyn Fn(T)>>,
}

impl<T> Notifier<T> {
    /// Create a notifier that forwards to the given closure.
    pub fn new(f: impl Fn(T) + 'static) -> Self {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty notifier.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Fire the notifier with the payload, if one is set.
    pub fn emit(&self, payload: T) {
        if let Some(f) = &self.f {
            f(payload);
        }
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("set", &self.f.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_forwards_payload() {
        let seen = Rc::new(Cell::new(0));
        let inner = Rc::clone(&seen);
        let n = Notifier::new(move |v: i32| inner.set(v));
        n.emit(42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_empty_notifier_is_a_no_op() {
        let n: Notifier<i32> = Notifier::none();
        assert!(n.is_none());
        n.emit(7);
    }

    #[test]
    fn test_debug_shows_whether_set() {
        let set = Notifier::new(|_: i32| {});
        let unset: Notifier<i32> = Notifier::none();
        assert_eq!(format!("{set:?}"), "Notifier { set: true }");
        assert_eq!(format!("{unset:?}"), "Notifier { set: false }");
    }
}
