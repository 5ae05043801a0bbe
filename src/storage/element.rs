//! Element Module
//!
//! Defines the unit stored under each key.

use tokio::time::Instant;

use super::order::SlotId;

// == Element ==
/// A stored value together with its last-write time.
///
/// `slot` is the element's position in the recency list. It stays stable for
/// the whole life of the element, including across renewals.
#[derive(Debug, Clone)]
pub struct Element {
    /// The stored value
    pub value: String,
    /// Time of creation or last update
    pub timestamp: Instant,
    pub(crate) slot: SlotId,
}

impl Element {
    // == Constructor ==
    /// Creates an element written at `now`.
    pub(crate) fn new(value: String, now: Instant, slot: SlotId) -> Self {
        Self {
            value,
            timestamp: now,
            slot,
        }
    }

    // == Renew ==
    /// Replaces the value and refreshes the write time.
    pub(crate) fn renew(&mut self, value: String, now: Instant) {
        self.value = value;
        self.timestamp = now;
    }
}
