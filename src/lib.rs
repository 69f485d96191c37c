mod args;
mod bag;
mod constants;
mod error;
mod selfcheck;

pub use args::Args;
pub use bag::Bag;
pub use constants::{Value, CAPACITY, DEFAULT_ROUNDS, DEFAULT_SEED};
pub use error::BagError;
pub use selfcheck::{demonstrate_overflow, Report, SelfCheck};
