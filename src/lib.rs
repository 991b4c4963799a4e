//! Keypad calculator with a persisted history and an optional AI solver.

pub mod ai;
pub mod calculator;
pub mod config;
pub mod history;
pub mod session;
pub mod ui;
