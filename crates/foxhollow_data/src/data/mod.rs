//! Core data structures for the foxhollow simulation.

pub mod animal;
pub mod environment;
pub mod terrain;
