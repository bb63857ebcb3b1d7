//! Typed handles over the store actors.

#[macro_use]
mod macros;

pub mod user_client;
pub mod car_client;
pub mod order_client;

pub use user_client::*;
pub use car_client::*;
pub use order_client::*;
