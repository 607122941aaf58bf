pub mod actor;
pub use actor::*;

pub mod server;
pub use server::*;

pub mod stadium;
pub use stadium::*;
