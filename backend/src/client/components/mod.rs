//! Presentation components.
//!
//! Each component renders [`ClientState`] into a plain, serialisable view
//! model. No component holds state of its own or talks to the API; user
//! actions are routed back through the controller.

pub mod banner;
pub mod form;
pub mod list;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::state::ClientState;

pub use banner::BannerView;
pub use form::{FieldView, FormMode, FormView};
pub use list::{ListView, UserRowView};

const PAGE_TITLE: &str = "User Management";

/// The whole page: form above list, banner overlaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title: &'static str,
    pub form: FormView,
    pub list: ListView,
    pub banner: Option<BannerView>,
}

impl PageView {
    pub fn render(state: &ClientState, now: DateTime<Utc>) -> Self {
        Self {
            title: PAGE_TITLE,
            form: FormView::render(state),
            list: ListView::render(state),
            banner: BannerView::render(state.notification(), now),
        }
    }
}
