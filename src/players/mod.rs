//! Scripted participants for simulated classrooms.

mod agent;
mod coin;
mod nash;

pub use agent::*;
pub use coin::*;
pub use nash::*;
