//! Create/edit form.

use serde::Serialize;

use crate::client::state::ClientState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

/// One labelled text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub placeholder: &'static str,
    pub required: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub mode: FormMode,
    pub heading: &'static str,
    pub name: FieldView,
    pub email: FieldView,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub clear_label: &'static str,
    /// Present in edit mode only.
    pub cancel_label: Option<&'static str>,
}

impl FormView {
    pub fn render(state: &ClientState) -> Self {
        let mode = if state.editing().is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        };
        let busy = state.is_busy();
        let form = state.form();

        let (heading, action) = match mode {
            FormMode::Create => ("Create New User", "Create User"),
            FormMode::Edit => ("Edit User", "Update User"),
        };

        Self {
            mode,
            heading,
            name: FieldView {
                id: "name",
                label: "Name",
                input_type: "text",
                value: form.name.clone(),
                placeholder: "Enter user name",
                required: true,
                disabled: busy,
            },
            email: FieldView {
                id: "email",
                label: "Email",
                input_type: "email",
                value: form.email.clone(),
                placeholder: "Enter user email",
                required: true,
                disabled: busy,
            },
            submit_label: if busy { "Saving..." } else { action },
            submit_disabled: busy,
            clear_label: "Clear Form",
            cancel_label: (mode == FormMode::Edit).then_some("Cancel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::ClientEvent;
    use crate::client::test_support::user;
    use rstest::rstest;

    #[rstest]
    fn create_mode_has_empty_fields_and_no_cancel() {
        let view = FormView::render(&ClientState::new());

        assert_eq!(view.mode, FormMode::Create);
        assert_eq!(view.heading, "Create New User");
        assert_eq!(view.submit_label, "Create User");
        assert_eq!(view.name.placeholder, "Enter user name");
        assert_eq!(view.email.placeholder, "Enter user email");
        assert!(view.name.value.is_empty());
        assert!(view.cancel_label.is_none());
    }

    #[rstest]
    fn edit_mode_reflects_target_values() {
        let mut state = ClientState::new();
        state.apply(ClientEvent::EditStarted(user(4, "Dee", "dee@x.com")));

        let view = FormView::render(&state);

        assert_eq!(view.heading, "Edit User");
        assert_eq!(view.submit_label, "Update User");
        assert_eq!(view.name.value, "Dee");
        assert_eq!(view.email.value, "dee@x.com");
        assert_eq!(view.cancel_label, Some("Cancel"));
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn busy_disables_inputs_and_shows_saving(#[case] editing: bool) {
        let mut state = ClientState::new();
        if editing {
            state.apply(ClientEvent::EditStarted(user(4, "Dee", "dee@x.com")));
        }
        state.apply(ClientEvent::MutationStarted);

        let view = FormView::render(&state);

        assert_eq!(view.submit_label, "Saving...");
        assert!(view.submit_disabled);
        assert!(view.name.disabled && view.email.disabled);
    }

    #[rstest]
    fn cleared_form_stays_in_edit_mode() {
        let mut state = ClientState::new();
        state.apply(ClientEvent::EditStarted(user(4, "Dee", "dee@x.com")));
        state.apply(ClientEvent::FormCleared);

        let view = FormView::render(&state);

        assert_eq!(view.mode, FormMode::Edit);
        assert!(view.name.value.is_empty() && view.email.value.is_empty());
    }
}
