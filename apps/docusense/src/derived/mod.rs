//! Derived views — pure functions from analysis payloads to chart series,
//! export text and interview questions. No I/O, no shared state.

pub mod chart;
pub mod export;
pub mod interview;
