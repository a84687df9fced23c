//! Client-side state controller and presentation components.
//!
//! The controller owns a [`ClientState`] and mutates it exclusively through
//! [`ClientState::apply`], performing at most one [`UsersApi`] round trip per
//! operation. Components render the state into serialisable view models so a
//! frontend only has to draw them.

pub mod api;
pub mod components;
pub mod controller;
pub mod state;
#[cfg(test)]
pub(crate) mod test_support;

pub use api::{HttpUsersApi, UserPayload, UsersApi, UsersApiError};
pub use components::PageView;
pub use controller::{ConfirmPrompt, ControllerOutcome, DELETE_CONFIRMATION, UserController};
pub use state::{ClientEvent, ClientState, FormState, Notification, NotificationKind};
