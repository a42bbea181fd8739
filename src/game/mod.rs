//! Rules of the lawsuit negotiation: who moves, which moves are legal,
//! and what each terminal outcome pays.

mod guilt;
mod offer;
mod payoff;
mod response;
mod role;
mod stage;

pub use guilt::*;
pub use offer::*;
pub use payoff::*;
pub use response::*;
pub use role::*;
pub use stage::*;
