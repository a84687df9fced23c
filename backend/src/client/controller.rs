//! Drives [`ClientState`] through the users API.
//!
//! Each operation performs at most one API round trip. Mutations are guarded
//! by the busy flag, which stays set for the whole round trip and is cleared
//! by the resulting success or failure event.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{debug, warn};

use crate::client::api::{UserPayload, UsersApi, UsersApiError};
use crate::client::components::PageView;
use crate::client::state::{ClientEvent, ClientState};
use crate::domain::{User, UserId};

/// Question asked before deleting a user.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

const FETCH_FAILED: &str = "Failed to fetch users";
const CREATE_FAILED: &str = "Failed to create user";
const UPDATE_FAILED: &str = "Failed to update user";
const DELETE_FAILED: &str = "Failed to delete user";

/// Asks the person at the keyboard to confirm a destructive action.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, question: &str) -> bool;
}

/// Result of a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerOutcome {
    /// The API call succeeded and state reflects it.
    Applied,
    /// The API call failed; an error notification is showing.
    Failed,
    /// Another mutation is in flight; nothing was sent.
    Busy,
    /// The confirmation prompt was declined.
    Cancelled,
    /// Update requested while not editing anyone.
    NoEditTarget,
    /// A required field is blank; nothing was sent.
    Incomplete,
}

/// Client controller owning the page state.
pub struct UserController {
    api: Arc<dyn UsersApi>,
    prompt: Arc<dyn ConfirmPrompt>,
    clock: Arc<dyn Clock>,
    state: ClientState,
}

impl UserController {
    pub fn new(api: Arc<dyn UsersApi>, prompt: Arc<dyn ConfirmPrompt>) -> Self {
        Self::with_clock(api, prompt, Arc::new(DefaultClock))
    }

    pub fn with_clock(
        api: Arc<dyn UsersApi>,
        prompt: Arc<dyn ConfirmPrompt>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            api,
            prompt,
            clock,
            state: ClientState::new(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Render the page for the current clock reading.
    pub fn view(&self) -> PageView {
        PageView::render(&self.state, self.clock.utc())
    }

    /// Apply a local event that needs no API call (typing, dismissing).
    pub fn dispatch(&mut self, event: ClientEvent) {
        self.state.apply(event);
    }

    /// Fetch the collection. Called once when the page mounts.
    pub async fn load(&mut self) -> ControllerOutcome {
        match self.api.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                self.state.apply(ClientEvent::Loaded(users));
                ControllerOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "loading users failed");
                let at = self.clock.utc();
                self.state.apply(ClientEvent::LoadFailed {
                    message: FETCH_FAILED.to_owned(),
                    at,
                });
                ControllerOutcome::Failed
            }
        }
    }

    /// Submit the form to whichever handler matches the current mode.
    pub async fn submit(&mut self) -> ControllerOutcome {
        if self.state.editing().is_some() {
            self.update().await
        } else {
            self.create().await
        }
    }

    /// Create a user from the form values.
    pub async fn create(&mut self) -> ControllerOutcome {
        if self.state.is_busy() {
            return ControllerOutcome::Busy;
        }
        if !self.state.form().is_complete() {
            return ControllerOutcome::Incomplete;
        }
        let payload = self.payload();
        self.state.apply(ClientEvent::MutationStarted);
        let result = self.api.create_user(&payload).await;
        let at = self.clock.utc();
        match result {
            Ok(user) => {
                self.state.apply(ClientEvent::Created { user, at });
                ControllerOutcome::Applied
            }
            Err(err) => self.fail(&err, CREATE_FAILED),
        }
    }

    /// Save the form values onto the user being edited.
    pub async fn update(&mut self) -> ControllerOutcome {
        let Some(id) = self.state.editing().map(User::id) else {
            return ControllerOutcome::NoEditTarget;
        };
        if self.state.is_busy() {
            return ControllerOutcome::Busy;
        }
        if !self.state.form().is_complete() {
            return ControllerOutcome::Incomplete;
        }
        let payload = self.payload();
        self.state.apply(ClientEvent::MutationStarted);
        let result = self.api.update_user(id, &payload).await;
        let at = self.clock.utc();
        match result {
            Ok(user) => {
                self.state.apply(ClientEvent::Updated { user, at });
                ControllerOutcome::Applied
            }
            Err(err) => self.fail(&err, UPDATE_FAILED),
        }
    }

    /// Delete after the prompt confirms.
    pub async fn delete(&mut self, id: UserId) -> ControllerOutcome {
        if self.state.is_busy() {
            return ControllerOutcome::Busy;
        }
        if !self.prompt.confirm(DELETE_CONFIRMATION) {
            return ControllerOutcome::Cancelled;
        }
        self.state.apply(ClientEvent::MutationStarted);
        let result = self.api.delete_user(id).await;
        let at = self.clock.utc();
        match result {
            Ok(()) => {
                self.state.apply(ClientEvent::Deleted { id, at });
                ControllerOutcome::Applied
            }
            Err(err) => self.fail(&err, DELETE_FAILED),
        }
    }

    /// Switch the form to edit mode for `user`.
    pub fn edit(&mut self, user: User) -> ControllerOutcome {
        if self.state.is_busy() {
            return ControllerOutcome::Busy;
        }
        self.state.apply(ClientEvent::EditStarted(user));
        ControllerOutcome::Applied
    }

    pub fn cancel_edit(&mut self) {
        self.state.apply(ClientEvent::EditCancelled);
    }

    pub fn clear_form(&mut self) {
        self.state.apply(ClientEvent::FormCleared);
    }

    pub fn dismiss_notification(&mut self) {
        self.state.apply(ClientEvent::NotificationDismissed);
    }

    /// Expire the notification once its display time has passed.
    pub fn tick(&mut self) {
        let now = self.clock.utc();
        self.state.apply(ClientEvent::Tick(now));
    }

    fn payload(&self) -> UserPayload {
        let form = self.state.form();
        UserPayload {
            name: form.name.clone(),
            email: form.email.clone(),
        }
    }

    fn fail(&mut self, err: &UsersApiError, fallback: &str) -> ControllerOutcome {
        warn!(error = %err, "users API call failed");
        let message = err.server_message().unwrap_or(fallback).to_owned();
        let at = self.clock.utc();
        self.state.apply(ClientEvent::MutationFailed { message, at });
        ControllerOutcome::Failed
    }
}
