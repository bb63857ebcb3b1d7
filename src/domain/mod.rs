pub mod user;
pub mod car;
pub mod order;

pub use user::*;
pub use car::*;
pub use order::*;
