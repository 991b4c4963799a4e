//! A calculator session: keypad state, history, and the solver slot.
//!
//! The session is the only writer of both the [`CalculatorState`] and the
//! [`HistoryLedger`]. Every ledger mutation is followed by a write to the
//! store, after the in-memory change has been made.

use crate::ai::{AiSlot, SolverGateway, Ticket};
use crate::calculator::{CalculatorState, Key, Step, step};
use crate::history::{HistoryEntry, HistoryLedger, HistoryStore};

pub struct Session<S: HistoryStore> {
    state: CalculatorState,
    ledger: HistoryLedger,
    store: S,
    solver: AiSlot,
}

impl<S: HistoryStore> Session<S> {
    /// Start a session, restoring history from `store`.
    pub fn open(store: S) -> Self {
        let ledger = HistoryLedger::load(&store);
        Self {
            state: CalculatorState::default(),
            ledger,
            store,
            solver: AiSlot::new(),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Apply one key. Returns the new history entry when `=` completed a
    /// calculation.
    pub fn press(&mut self, key: Key) -> Option<&HistoryEntry> {
        let Step { state, completed } = step(&self.state, key);
        tracing::debug!(%key, display = %state.display, hint = %state.expression, "Key pressed");
        self.state = state;

        let calculation = completed?;
        self.ledger.append(HistoryEntry::from(calculation));
        self.ledger.persist(&self.store);
        self.ledger.latest()
    }

    /// Apply keys in order. Returns how many calculations were recorded.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) -> usize {
        keys.into_iter()
            .filter(|&key| self.press(key).is_some())
            .count()
    }

    /// Remove every history entry.
    pub fn clear_history(&mut self) {
        self.ledger.clear();
        self.ledger.persist(&self.store);
        tracing::info!("Calculation history cleared");
    }

    /// Register a solver request for `query`. Any earlier request is dropped.
    pub fn begin_solve(&mut self, query: &str) -> Ticket {
        self.solver.begin(query)
    }

    /// Abandon the solver request in flight; its answer will be ignored.
    pub fn cancel_solve(&mut self) -> bool {
        let cancelled = self.solver.cancel();
        if cancelled {
            tracing::debug!("Solver request cancelled");
        }
        cancelled
    }

    /// Show `answer` if `ticket` is still the live request.
    ///
    /// Returns `false` and leaves the state untouched for stale tickets.
    pub fn finish_solve(&mut self, ticket: Ticket, answer: &str) -> bool {
        match self.solver.finish(ticket) {
            Some(query) => {
                self.state.apply_answer(&query, answer);
                true
            }
            None => {
                tracing::debug!("Discarding stale solver answer");
                false
            }
        }
    }

    pub fn solving(&self) -> bool {
        self.solver.is_busy()
    }

    /// Ask `gateway` and show the answer.
    pub async fn solve(&mut self, gateway: &dyn SolverGateway, query: &str) -> bool {
        let ticket = self.begin_solve(query);
        let answer = gateway.solve(query).await;
        self.finish_solve(ticket, &answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CONNECTION_ERROR;
    use crate::calculator::{Operator, tokenize};
    use crate::history::{MAX_ENTRIES, MemoryStore};
    use futures::FutureExt;
    use futures::future::BoxFuture;

    struct FixedSolver(&'static str);

    impl SolverGateway for FixedSolver {
        fn solve<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, String> {
            futures::future::ready(self.0.to_string()).boxed()
        }
    }

    fn press_line<S: HistoryStore>(session: &mut Session<S>, line: &str) -> usize {
        session.press_all(tokenize(line).unwrap())
    }

    #[test]
    fn test_equals_appends_and_persists() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let recorded = session
            .press_all([
                Key::Digit('5'),
                Key::Operator(Operator::Add),
                Key::Digit('3'),
                Key::Operator(Operator::Add),
                Key::Digit('2'),
                Key::Equals,
            ]);
        assert_eq!(recorded, 1);
        assert_eq!(session.state().display, "10");

        let latest = session.history().latest().unwrap();
        assert_eq!(latest.expression, "8 + 2 =");
        assert_eq!(latest.result, "10");

        let stored = store.load().unwrap();
        assert_eq!(stored, session.history().entries());
    }

    #[test]
    fn test_non_equals_keys_do_not_write() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);
        press_line(&mut session, "1 2 + 3 DEL +/- AC");
        assert!(store.raw().is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_survives_reopen() {
        let store = MemoryStore::new();
        {
            let mut session = Session::open(&store);
            press_line(&mut session, "2 ^ 1 0 =");
            press_line(&mut session, "9 / 0 =");
        }

        let session = Session::open(&store);
        let entries = session.history().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].expression, "9 / 0 =");
        assert_eq!(entries[0].result, "0");
        assert_eq!(entries[1].result, "1024");
        assert_eq!(session.state(), &CalculatorState::default());
    }

    #[test]
    fn test_ledger_is_capped_through_session() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);
        for _ in 0..(MAX_ENTRIES + 1) {
            press_line(&mut session, "1 + 1 =");
        }
        assert_eq!(session.history().len(), MAX_ENTRIES);
        assert_eq!(store.load().unwrap().len(), MAX_ENTRIES);
    }

    #[test]
    fn test_clear_history_persists_empty_list() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);
        press_line(&mut session, "4 * 4 =");
        session.clear_history();
        assert!(session.history().is_empty());
        assert_eq!(store.raw().as_deref(), Some("[]"));
        assert_eq!(session.state().display, "16");
    }

    #[test]
    fn test_corrupt_store_opens_empty() {
        let store = MemoryStore::with_raw("{{{");
        let mut session = Session::open(&store);
        assert!(session.history().is_empty());
        press_line(&mut session, "1 + 2 =");
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_stale_answer_is_discarded() {
        let mut session = Session::open(MemoryStore::new());
        press_line(&mut session, "4 2");

        let ticket = session.begin_solve("meaning of life");
        assert!(session.solving());
        assert!(session.cancel_solve());
        assert!(!session.finish_solve(ticket, "42"));
        assert_eq!(session.state().display, "42");
        assert_eq!(session.state().expression, "");
    }

    #[test]
    fn test_live_answer_is_applied() {
        let mut session = Session::open(MemoryStore::new());
        press_line(&mut session, "7 +");

        let ticket = session.begin_solve("half of 14");
        assert!(session.finish_solve(ticket, "7"));
        assert!(!session.solving());
        assert_eq!(session.state().display, "7");
        assert_eq!(session.state().expression, "half of 14");
        assert_eq!(session.state().pending, None);
    }

    #[tokio::test]
    async fn test_solve_applies_gateway_text() {
        let mut session = Session::open(MemoryStore::new());
        let applied = session
            .solve(&FixedSolver(CONNECTION_ERROR), "anything")
            .await;
        assert!(applied);
        assert_eq!(session.state().display, CONNECTION_ERROR);

        press_line(&mut session, "3");
        assert_eq!(session.state().display, "3");
        assert!(session.history().is_empty());
    }
}
