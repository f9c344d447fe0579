//! Procedural tail chains for 2D avatars.
//!
//! This crate is renderer-agnostic and does no IO. Hosts describe their avatars through
//! [`TailOwner`], draw through [`QuadSink`], and move appearance packets through [`Transport`].

#![forbid(unsafe_code)]

mod error;
mod geometry;
mod hair;
mod model;
mod motion;
mod owner;
mod peers;
mod render;
mod resolve;
mod runtime;
mod skin;
mod sync;
mod version;

#[cfg(feature = "json")]
pub mod json;

pub use error::*;
pub use hair::*;
pub use model::*;
pub use motion::*;
pub use owner::*;
pub use peers::*;
pub use render::*;
pub use resolve::*;
pub use runtime::*;
pub use skin::*;
pub use sync::*;
pub use version::*;

#[cfg(test)]
mod test_support;









#[cfg(all(test, feature = "json"))]
mod json_tests;
