//! AI word-problem solver.
//!
//! The calculator only depends on [`SolverGateway`]: a query goes in, display
//! text comes out. [`GeminiClient`] is the production gateway.

mod gateway;
mod gemini;
mod slot;

pub use gateway::{
    CONNECTION_ERROR, EMPTY_ANSWER, NOT_CONFIGURED, SolverGateway, answer_or_fallback,
    build_prompt,
};
pub use gemini::GeminiClient;
pub use slot::{AiSlot, Ticket};
