//! State container for the subscriptions table and its forms.
//!
//! A `Dashboard` owns everything one view needs: the API handle, the last
//! loaded rows, the edit form, the delete prompt and the toast queue. Every
//! mutating action takes `&mut self`, so one view never has two mutations in
//! flight.

use chrono::NaiveDate;
use common::subscription::Subscription;

use crate::{
    api::SubscriptionApi,
    error::{ClientError, ClientResult},
    notifications::Notifications,
    view::{RowView, rows_view},
    workflow::{DeleteConfirmation, FormMode, FormWorkflow},
};

pub struct Dashboard<A> {
    api: A,
    rows: Vec<Subscription>,
    loading: bool,
    form: FormWorkflow,
    delete: DeleteConfirmation,
    notifications: Notifications,
}

impl<A: SubscriptionApi> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self::with_notifications(api, Notifications::default())
    }

    pub fn with_notifications(api: A, notifications: Notifications) -> Self {
        Self {
            api,
            rows: Vec::new(),
            loading: false,
            form: FormWorkflow::new(),
            delete: DeleteConfirmation::default(),
            notifications,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn rows(&self) -> &[Subscription] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn form(&self) -> &FormWorkflow {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormWorkflow {
        &mut self.form
    }

    pub fn delete_prompt(&self) -> DeleteConfirmation {
        self.delete
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn rows_view(&self, today: NaiveDate) -> Vec<RowView> {
        rows_view(&self.rows, today)
    }

    /// Reloads the table. On failure the previous rows stay on screen.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.loading = true;
        let result = self.api.list().await;
        self.loading = false;

        match result {
            Ok(rows) => {
                log::debug!("loaded {} subscriptions", rows.len());
                self.rows = rows;
                Ok(())
            }
            Err(err) => {
                self.notifications.error("Error", &format!("Load failed: {err}"));
                Err(err)
            }
        }
    }

    pub fn open_create(&mut self, today: NaiveDate) {
        self.form.open_create(today);
    }

    /// Opens the form pre-filled from a row already in the table.
    pub fn open_edit(&mut self, id: i64) -> ClientResult<()> {
        let row = self
            .rows
            .iter()
            .find(|row| row.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Subscription {id}")))?;
        self.form.open_edit(row);
        Ok(())
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    /// Validates the open form and sends it. The form closes and the table
    /// reloads only after the server accepts the change.
    pub async fn submit_form(&mut self) -> ClientResult<()> {
        // field errors stay on the open form
        let submission = self.form.submit()?;

        let result = match submission.mode {
            FormMode::Create => self.api.create(&submission.payload).await.map(|_| ()),
            FormMode::Edit(id) => self.api.update(id, &submission.payload).await,
        };

        match result {
            Ok(()) => {
                let message = match submission.mode {
                    FormMode::Create => "Subscription added.",
                    FormMode::Edit(_) => "Subscription updated.",
                };
                self.notifications.success("Success", message);
                self.form.succeed();
                // a failed reload raises its own toast
                let _ = self.refresh().await;
                Ok(())
            }
            Err(err) => {
                log::warn!("save failed: {err}");
                self.form.fail();
                self.notifications.error("Error", &format!("Save failed: {err}"));
                Err(err)
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.delete.request(id);
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the pending row. Returns `Ok(false)` when nothing was pending.
    pub async fn confirm_delete(&mut self) -> ClientResult<bool> {
        let Some(id) = self.delete.confirm() else {
            return Ok(false);
        };

        match self.api.delete(id).await {
            Ok(()) => {
                self.notifications.success("Deleted", "Subscription removed.");
                let _ = self.refresh().await;
                Ok(true)
            }
            Err(err) => {
                log::warn!("delete of {id} failed: {err}");
                self.notifications
                    .error("Error", &format!("Delete failed: {err}"));
                Err(err)
            }
        }
    }
}
