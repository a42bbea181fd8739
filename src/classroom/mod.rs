//! Session-level operations over the shared store.
//!
//! Every operation re-reads the state it needs and returns a fresh
//! [`Status`]; nothing here sleeps or redraws. Whoever drives a participant
//! (a UI adapter, the simulation binary, a test) decides when to ask again.

mod admin;
mod classroom;
mod round;
mod status;
mod student;

pub use admin::*;
pub use classroom::*;
pub use round::*;
pub use status::*;
pub use student::*;
