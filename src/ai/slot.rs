//! Single in-flight solver request tracking.
//!
//! Starting a request or cancelling one bumps the generation, so an answer
//! that arrives for an older ticket is recognized as stale and dropped.

/// Handle for one solver request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct AiSlot {
    generation: u64,
    in_flight: Option<(u64, String)>,
}

impl AiSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `query`, superseding any request in flight.
    pub fn begin(&mut self, query: &str) -> Ticket {
        self.generation += 1;
        if let Some((_, previous)) = self.in_flight.replace((self.generation, query.to_string())) {
            tracing::debug!(%previous, "Superseding in-flight solver request");
        }
        Ticket(self.generation)
    }

    /// Abandon the request in flight, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.in_flight.take().is_some()
    }

    /// Claim the query for `ticket` if it is still the live request.
    pub fn finish(&mut self, ticket: Ticket) -> Option<String> {
        match &self.in_flight {
            Some((generation, _)) if *generation == ticket.0 => {
                self.in_flight.take().map(|(_, query)| query)
            }
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
