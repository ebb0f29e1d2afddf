//! Core state and the timer-driven update cycle

pub mod constants;
mod update;

pub use update::TempGraph;
