//! System orchestration, startup, and shutdown logic.

pub mod fixtures;
pub mod showroom_system;
pub mod telemetry;

pub use showroom_system::*;
pub use telemetry::*;
