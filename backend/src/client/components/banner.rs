//! Notification banner.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::state::{Notification, NotificationKind};

const DISMISS_LABEL: &str = "\u{d7}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub message: String,
    pub kind: NotificationKind,
    pub dismiss_label: &'static str,
    /// Time left before auto-dismiss, for scheduling the next tick.
    pub remaining_ms: i64,
}

impl BannerView {
    /// Render the notification unless it has already expired at `now`.
    pub fn render(notification: Option<&Notification>, now: DateTime<Utc>) -> Option<Self> {
        let notification = notification.filter(|n| !n.is_expired(now))?;
        Some(Self {
            message: notification.message().to_owned(),
            kind: notification.kind(),
            dismiss_label: DISMISS_LABEL,
            remaining_ms: (notification.expires_at() - now).num_milliseconds(),
        })
    }
}
