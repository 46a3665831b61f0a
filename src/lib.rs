//! Bike Rental Form Service
//!
//! Serves a single-page bike rental form and submits the entered rental and
//! payment details as JSON to a remote endpoint, reporting success or the
//! endpoint's error back on the page.
//!
//! # Modules
//!
//! - `controller`: FormController, owner of the form and its submission status
//! - `client`: the SubmissionEndpoint seam and its reqwest implementation
//! - `session`: one FormController per visitor, keyed by a session cookie
//! - `validation`: field constraints checked before a submission may go out
//! - `routes`/`handlers`/`views`: the HTML page and the JSON API
//!
//! # Submission
//!
//! The form is POSTed with `Content-Type: application/json`. Any non-2xx
//! status is a failure; its message comes from the body's `message` field,
//! then `error`, then a generic line.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod validation;
pub mod views;


// Re-export the main API types for ease of use
pub use client::{HttpSubmissionClient, SubmissionEndpoint};
pub use config::AppConfig;
pub use controller::FormController;
pub use error::SubmitError;
pub use handlers::api::AppState;
pub use models::form::{FormField, RentalForm};
pub use models::status::{FormSnapshot, SubmissionPhase, SubmissionStatus};
pub use routes::create_router;
pub use session::{FormSession, SessionStore};
