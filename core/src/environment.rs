//! Swap-request environment.
//!
//! Bundles the collaborators the orchestrator depends on so they can be
//! injected as one value.

use crate::providers::{ItemStore, Notifier, SwapRequestStore, UserDirectory};
use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for deterministic tests
///
/// Always returns the same time.
///
/// # Example
///
/// ```
/// use swapp_core::environment::{Clock, FixedClock};
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Swap-request environment.
///
/// # Type Parameters
///
/// - `I`: Item store
/// - `S`: Swap request store
/// - `U`: User directory
/// - `N`: Notification channel
/// - `C`: Clock
#[derive(Clone)]
pub struct SwapEnvironment<I, S, U, N, C = SystemClock>
where
    I: ItemStore + Clone,
    S: SwapRequestStore + Clone,
    U: UserDirectory + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Item store (owns the reservation flag).
    pub items: I,

    /// Swap request store.
    pub requests: S,

    /// User directory (names and addresses for notifications).
    pub users: U,

    /// Notification channel.
    pub notifier: N,

    /// Clock used for creation timestamps.
    pub clock: C,
}

impl<I, S, U, N> SwapEnvironment<I, S, U, N, SystemClock>
where
    I: ItemStore + Clone,
    S: SwapRequestStore + Clone,
    U: UserDirectory + Clone,
    N: Notifier + Clone,
{
    /// Create an environment using the wall clock.
    #[must_use]
    pub const fn new(items: I, requests: S, users: U, notifier: N) -> Self {
        Self {
            items,
            requests,
            users,
            notifier,
            clock: SystemClock,
        }
    }
}

impl<I, S, U, N, C> SwapEnvironment<I, S, U, N, C>
where
    I: ItemStore + Clone,
    S: SwapRequestStore + Clone,
    U: UserDirectory + Clone,
    N: Notifier + Clone,
    C: Clock + Clone,
{
    /// Replace the clock.
    #[must_use]
    pub fn with_clock<C2: Clock + Clone>(self, clock: C2) -> SwapEnvironment<I, S, U, N, C2> {
        SwapEnvironment {
            items: self.items,
            requests: self.requests,
            users: self.users,
            notifier: self.notifier,
            clock,
        }
    }
}
