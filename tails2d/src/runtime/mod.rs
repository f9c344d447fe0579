mod chain;
mod rig;
mod tails;

pub use chain::*;
pub use rig::*;
pub use tails::*;

#[cfg(test)]
mod chain_tests;
