//! Scoped registrations on a [`Document`](crate::document::Document).

use std::{fmt, rc::Weak};

use log::trace;

use crate::document::Host;

/// What a [`Subscription`] keeps registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registration {
    Observer(u64),
    Timer(u64),
}

/// Handle to an observer or timer. Dropping it unregisters the callback.
///
/// A subscription never keeps its document alive; once the document is gone
/// the subscription is inert.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    host: Weak<Host>,
    registration: Option<Registration>,
}

impl Subscription {
    pub(crate) fn new(host: Weak<Host>, registration: Registration) -> Self {
        Self {
            host,
            registration: Some(registration),
        }
    }

    /// Returns true while the callback can still be invoked.
    ///
    /// A timer stops being active once it has fired.
    pub fn is_active(&self) -> bool {
        match (self.registration, self.host.upgrade()) {
            (Some(registration), Some(host)) => host.is_registered(registration),
            _ => false,
        }
    }

    /// Unregisters the callback now. Equivalent to dropping the subscription.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        if let Some(host) = self.host.upgrade() {
            let released = host.release(registration);
            trace!(registration:?, released; "Subscription released");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("registration", &self.registration)
            .field("active", &self.is_active())
            .finish()
    }
}
