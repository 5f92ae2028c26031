mod action;
mod credentials;
mod event;
mod gateway;
mod message;
mod sender;
mod slash_commands;
mod training_program;
pub mod wire;

pub use action::*;
pub use credentials::*;
pub use event::*;
pub use gateway::*;
pub use message::*;
pub use sender::*;
pub use slash_commands::*;
pub use training_program::*;
