//! Registration, role balancing and pairing of participants.

mod assign;
mod matcher;
mod pairing;
mod participant;

pub use assign::*;
pub use matcher::*;
pub use pairing::*;
pub use participant::*;
