//! Client state and its reducer.
//!
//! [`ClientState::apply`] is the only way state changes. Every transition is
//! synchronous and pure apart from the timestamps carried by the events, so
//! the whole client can be tested without I/O or a real clock.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::domain::{User, UserId};

/// How long a notification stays visible before it auto-dismisses.
pub const NOTIFICATION_TTL_SECS: i64 = 5;

pub(crate) const CREATED_MESSAGE: &str = "User created successfully!";
pub(crate) const UPDATED_MESSAGE: &str = "User updated successfully!";
pub(crate) const DELETED_MESSAGE: &str = "User deleted successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    message: String,
    kind: NotificationKind,
    shown_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, shown_at: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at,
        }
    }

    pub fn success(message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self::new(message, NotificationKind::Success, shown_at)
    }

    pub fn error(message: impl Into<String>, shown_at: DateTime<Utc>) -> Self {
        Self::new(message, NotificationKind::Error, shown_at)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }

    /// Instant at which the banner dismisses itself.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + TimeDelta::seconds(NOTIFICATION_TTL_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// Raw text currently typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
}

impl FormState {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    /// Both required inputs hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

impl From<&User> for FormState {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// State transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Initial fetch succeeded.
    Loaded(Vec<User>),
    LoadFailed {
        message: String,
        at: DateTime<Utc>,
    },
    /// A mutating request is in flight.
    MutationStarted,
    Created {
        user: User,
        at: DateTime<Utc>,
    },
    Updated {
        user: User,
        at: DateTime<Utc>,
    },
    Deleted {
        id: UserId,
        at: DateTime<Utc>,
    },
    MutationFailed {
        message: String,
        at: DateTime<Utc>,
    },
    EditStarted(User),
    EditCancelled,
    NameChanged(String),
    EmailChanged(String),
    /// Resets both fields. Edit mode is kept.
    FormCleared,
    NotificationDismissed,
    /// Clock reading used to expire the notification.
    Tick(DateTime<Utc>),
}

/// Everything the page renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    users: Vec<User>,
    editing: Option<User>,
    busy: bool,
    notification: Option<Notification>,
    form: FormState,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Users in display order, newest first.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn editing(&self) -> Option<&User> {
        self.editing.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Apply one transition.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use user_directory::client::{ClientEvent, ClientState};
    ///
    /// let mut state = ClientState::new();
    /// state.apply(ClientEvent::MutationStarted);
    /// assert!(state.is_busy());
    /// state.apply(ClientEvent::MutationFailed {
    ///     message: "Failed to create user".into(),
    ///     at: Utc::now(),
    /// });
    /// assert!(!state.is_busy());
    /// ```
    pub fn apply(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Loaded(users) => self.users = users,
            ClientEvent::LoadFailed { message, at } => {
                self.users.clear();
                self.notify(Notification::error(message, at));
            }
            ClientEvent::MutationStarted => self.busy = true,
            ClientEvent::Created { user, at } => {
                self.busy = false;
                self.users.insert(0, user);
                self.notify(Notification::success(CREATED_MESSAGE, at));
            }
            ClientEvent::Updated { user, at } => {
                self.busy = false;
                if let Some(slot) = self.users.iter_mut().find(|u| u.id() == user.id()) {
                    *slot = user;
                }
                self.editing = None;
                self.form = FormState::default();
                self.notify(Notification::success(UPDATED_MESSAGE, at));
            }
            ClientEvent::Deleted { id, at } => {
                self.busy = false;
                self.users.retain(|u| u.id() != id);
                self.notify(Notification::success(DELETED_MESSAGE, at));
            }
            ClientEvent::MutationFailed { message, at } => {
                self.busy = false;
                self.notify(Notification::error(message, at));
            }
            ClientEvent::EditStarted(user) => {
                self.form = FormState::from(&user);
                self.editing = Some(user);
            }
            ClientEvent::EditCancelled => {
                self.editing = None;
                self.form = FormState::default();
            }
            ClientEvent::NameChanged(name) => self.form.name = name,
            ClientEvent::EmailChanged(email) => self.form.email = email,
            ClientEvent::FormCleared => self.form = FormState::default(),
            ClientEvent::NotificationDismissed => self.notification = None,
            ClientEvent::Tick(now) => {
                if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
                    self.notification = None;
                }
            }
        }
    }

    /// A new notification always replaces the previous one.
    fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }
}
