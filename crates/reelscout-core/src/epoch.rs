//! Epoch fencing.
//!
//! Every reset bumps the owning controller's [`Epoch`]. Work issued under an
//! epoch is wrapped in [`Fenced`] and is only admitted back into state while
//! that epoch is still current. Responses may resolve in any order; fencing
//! never relies on arrival order.

use std::fmt;

/// Monotonic generation counter of a controller's state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Moves to the next epoch and returns it.
    pub const fn advance(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    /// Stamps a value with this epoch.
    #[must_use]
    pub const fn fence<T>(self, value: T) -> Fenced<T> {
        Fenced { epoch: self, value }
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value issued under a specific epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fenced<T> {
    epoch: Epoch,
    value: T,
}

impl<T> Fenced<T> {
    /// Epoch the value was issued under.
    #[must_use]
    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Borrows the fenced value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Returns `true` if `current` is still the epoch this value was issued under.
    #[must_use]
    pub fn is_current(&self, current: Epoch) -> bool {
        self.epoch == current
    }
}
