//! Read-only fold of settled pairings into frequencies, beliefs and
//! a comparison with the classroom benchmark values.

mod report;
mod strategy;
mod tally;

pub use report::*;
pub use strategy::*;
pub use tally::*;
