//! Request generations for dropping stale responses.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues increasing tickets; only the newest one is current.
///
/// Take a ticket before sending, and apply the response only if the
/// ticket is still current when it arrives.
#[derive(Debug, Default)]
pub struct RequestTicket {
    generation: AtomicU64,
}

/// One issued generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestTicket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede every issued ticket without issuing a new one.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
