pub mod engine;
pub use engine::*;

pub mod event;
pub use event::*;

pub mod message;
pub use message::*;

pub mod players;
pub use players::*;

pub mod protocol;
pub use protocol::*;

pub mod registry;
pub use registry::*;

pub mod reject;
pub use reject::*;

pub mod room;
pub use room::*;

pub mod roster;
pub use roster::*;
