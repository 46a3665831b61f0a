use serde::Serialize;

use crate::models::form::RentalForm;

/// Loading, error and success flags for the submit button and the feedback boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

/// The phase derived from the three flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    /// A request is about to go out. Clears the previous outcome.
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
        self.success = false;
    }

    pub fn succeed(&mut self) {
        self.success = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.success = false;
    }

    /// The request resolved, whatever the outcome.
    pub fn settle(&mut self) {
        self.is_loading = false;
    }

    pub fn phase(&self) -> SubmissionPhase {
        if self.is_loading {
            SubmissionPhase::Submitting
        } else if self.error.is_some() {
            SubmissionPhase::Failed
        } else if self.success {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Idle
        }
    }
}

/// Form and status as observed at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub form: RentalForm,
    pub status: SubmissionStatus,
}
