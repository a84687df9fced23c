//! User table.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::client::state::ClientState;
use crate::domain::User;

const EMPTY_MESSAGE: &str = "No users found. Create your first user above!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRowView {
    pub id: i32,
    pub name: String,
    pub email: String,
    /// Creation date as `M/D/YYYY`.
    pub created: String,
    pub actions_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub heading: String,
    pub columns: [&'static str; 4],
    pub rows: Vec<UserRowView>,
    /// Placeholder shown instead of the table when there are no rows.
    pub empty_message: Option<&'static str>,
}

impl ListView {
    pub fn render(state: &ClientState) -> Self {
        let busy = state.is_busy();
        let rows: Vec<UserRowView> = state
            .users()
            .iter()
            .map(|user| row(user, busy))
            .collect();
        Self {
            heading: format!("Users ({})", rows.len()),
            columns: ["Name", "Email", "Created", "Actions"],
            empty_message: rows.is_empty().then_some(EMPTY_MESSAGE),
            rows,
        }
    }
}

fn row(user: &User, busy: bool) -> UserRowView {
    UserRowView {
        id: user.id().get(),
        name: user.name().to_string(),
        email: user.email().to_string(),
        created: format_date(user.created_at()),
        actions_disabled: busy,
    }
}

/// Dates are rendered in UTC so every viewer sees the same day.
pub fn format_date(at: DateTime<Utc>) -> String {
    format!("{}/{}/{}", at.month(), at.day(), at.year())
}
