//! Order-specific store logic: admin edits, tracking stages and cancellation.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
