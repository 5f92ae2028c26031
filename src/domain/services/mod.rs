pub mod actions;
mod app_state;
mod conversation;
mod credentials;
pub mod events;
mod formatting;
mod pagination;
mod rest_timer;
#[cfg(test)]
pub mod test_gateway;

pub use app_state::*;
pub use conversation::*;
pub use credentials::*;
pub use formatting::*;
pub use pagination::*;
pub use rest_timer::*;
