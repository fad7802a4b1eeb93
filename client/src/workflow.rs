//! Client-local state machines for the edit form and the delete prompt.

use chrono::NaiveDate;
use common::subscription::{FieldErrors, Subscription, SubscriptionPayload};

use crate::{
    error::{ClientError, ClientResult},
    validation::{SubscriptionForm, validate},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    pub mode: FormMode,
    pub fields: SubscriptionForm,
    pub errors: FieldErrors,
}

/// A validated form on its way to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: FormMode,
    pub payload: SubscriptionPayload,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Open(OpenForm),
    Submitting {
        submission: Submission,
        fields: SubscriptionForm,
    },
}

/// `Idle -> Open -> (validate) -> Submitting -> Idle`, falling back to `Open`
/// when validation or the server rejects the submission.
#[derive(Debug, Default)]
pub struct FormWorkflow {
    state: FormState,
}

impl FormWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FormState::Idle)
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        self.state = FormState::Open(OpenForm {
            mode: FormMode::Create,
            fields: SubscriptionForm::new_for(today),
            errors: FieldErrors::new(),
        });
    }

    pub fn open_edit(&mut self, row: &Subscription) {
        self.state = FormState::Open(OpenForm {
            mode: FormMode::Edit(row.id),
            fields: SubscriptionForm::from_row(row),
            errors: FieldErrors::new(),
        });
    }

    /// Editable inputs while the form is open.
    pub fn fields_mut(&mut self) -> Option<&mut SubscriptionForm> {
        match &mut self.state {
            FormState::Open(open) => Some(&mut open.fields),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            FormState::Open(open) => Some(&open.errors),
            _ => None,
        }
    }

    /// Validates the open form. On success the workflow moves to
    /// `Submitting`; on failure it stays open with the field messages.
    pub fn submit(&mut self) -> ClientResult<Submission> {
        let FormState::Open(open) = &mut self.state else {
            return Err(ClientError::InvalidState("no form is open"));
        };

        match validate(&open.fields) {
            Ok(payload) => {
                let submission = Submission {
                    mode: open.mode,
                    payload,
                };
                let fields = std::mem::take(&mut open.fields);
                self.state = FormState::Submitting {
                    submission: submission.clone(),
                    fields,
                };
                Ok(submission)
            }
            Err(errors) => {
                open.errors = errors.clone();
                Err(ClientError::Validation(errors))
            }
        }
    }

    /// The server accepted the submission.
    pub fn succeed(&mut self) {
        if matches!(self.state, FormState::Submitting { .. }) {
            self.state = FormState::Idle;
        }
    }

    /// The server refused the submission; reopen with the inputs untouched.
    pub fn fail(&mut self) {
        if let FormState::Submitting { submission, fields } = std::mem::take(&mut self.state) {
            self.state = FormState::Open(OpenForm {
                mode: submission.mode,
                fields,
                errors: FieldErrors::new(),
            });
        }
    }

    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
    }
}

/// `Idle -> Pending(id) -> Idle`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(i64),
}

impl DeleteConfirmation {
    pub fn request(&mut self, id: i64) {
        *self = DeleteConfirmation::Pending(id);
    }

    pub fn pending(&self) -> Option<i64> {
        match self {
            DeleteConfirmation::Pending(id) => Some(*id),
            DeleteConfirmation::Idle => None,
        }
    }

    /// Closes the prompt and hands back the id to delete, if one was pending.
    pub fn confirm(&mut self) -> Option<i64> {
        let id = self.pending();
        *self = DeleteConfirmation::Idle;
        id
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }
}
