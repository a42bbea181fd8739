//! Shared document store the classroom reads and writes.
//!
//! Business logic depends only on the [`Store`] trait; [`Memory`] is the
//! in-process implementation used by the simulation binary and tests.

mod memory;
mod path;
mod snapshot;
mod traits;

#[cfg(test)]
mod testing;

pub use memory::*;
pub use path::*;
pub use snapshot::*;
pub use traits::*;

#[cfg(test)]
pub use testing::*;
