use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::client::SubmissionEndpoint;
use crate::error::SubmitError;
use crate::models::form::{FormField, RentalForm};
use crate::models::status::{FormSnapshot, SubmissionStatus};

/// Owns the rental form and its submission status.
///
/// State lives in a watch channel so the page can observe every change.
/// Each mutation is a single `send_modify` and none is held across an await,
/// so `submit` can be awaited concurrently with field updates. Overlapping
/// submissions are not sequenced: whichever response resolves last decides
/// the final status.
pub struct FormController {
    endpoint: Arc<dyn SubmissionEndpoint>,
    state: watch::Sender<FormSnapshot>,
}

impl FormController {
    pub fn new(endpoint: Arc<dyn SubmissionEndpoint>) -> Self {
        let (state, _) = watch::channel(FormSnapshot::default());
        Self { endpoint, state }
    }

    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|snapshot| snapshot.form.set(field, value));
    }

    pub fn form(&self) -> RentalForm {
        self.state.borrow().form.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state.borrow().status.clone()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.state.subscribe()
    }

    /// Send the current form to the endpoint and record the outcome.
    ///
    /// Callers are expected to have validated the form already. On success
    /// the form is cleared; on failure it is kept so the user can fix it and
    /// try again.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let mut form = RentalForm::default();
        self.state.send_modify(|snapshot| {
            snapshot.status.begin();
            form = snapshot.form.clone();
        });

        let result = self.endpoint.submit(&form).await;

        self.state.send_modify(|snapshot| {
            match &result {
                Ok(()) => {
                    info!("Rental for bike {} submitted successfully", form.bike_id);
                    snapshot.status.succeed();
                    snapshot.form.reset();
                }
                Err(err) => {
                    error!("Failed to submit rental form: {}", err);
                    snapshot.status.fail(err.user_message());
                }
            }
            snapshot.status.settle();
        });

        result
    }
}
