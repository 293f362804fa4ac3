//! Snapshot slots for state that is fetched asynchronously and replaced wholesale.
//!
//! A [`Slot`] always holds a complete value. Requests that will eventually replace the value first
//! reserve a [`Ticket`] with [`Slot::begin`]. When the response arrives it is offered back with
//! [`Slot::commit`], which only accepts it if no response from a *later* request has been applied
//! in the meantime.
//!
//! Without this, two overlapping requests resolve in whatever order the network delivers them and
//! the slower one silently overwrites fresher data. With it, each slot converges on the value
//! produced by the most recently issued request that completed.

/// A reserved position in a slot's request sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Outcome of offering a value to a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Commit {
    Applied,
    /// A response from a later request already replaced the value.
    Stale,
}

impl Commit {
    pub fn is_applied(self) -> bool {
        matches!(self, Commit::Applied)
    }
}

#[derive(Clone, Debug)]
pub struct Slot<T> {
    value: T,
    /// Highest sequence number handed out by `begin`.
    issued: u64,
    /// Sequence number of the request that produced `value`. 0 means the initial value.
    applied: u64,
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            issued: 0,
            applied: 0,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Reserve a ticket for a request that is about to be issued.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Replace the value with the response to `ticket`, unless a later request got there first.
    pub fn commit(&mut self, ticket: Ticket, value: T) -> Commit {
        if ticket.0 <= self.applied {
            log::warn!(
                "Dropping stale response #{} (slot already at #{})",
                ticket.0,
                self.applied
            );
            return Commit::Stale;
        }
        self.value = value;
        self.applied = ticket.0;
        Commit::Applied
    }

    /// Replace the value right now. Supersedes every request still in flight.
    pub fn set(&mut self, value: T) {
        let ticket = self.begin();
        let _ = self.commit(ticket, value);
    }
}
