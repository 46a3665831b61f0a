use axum::{
    async_trait,
    extract::{FromRequestParts, Json as ExtractJson, Path},
    http::{header::SET_COOKIE, request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::SubmissionEndpoint;
use crate::controller::FormController;
use crate::models::form::{FieldUpdate, FormField};
use crate::session::{FormSession, SessionStore};
use crate::validation::{validate, FieldError};

// AppState struct containing shared resources
pub struct AppState {
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(endpoint: Arc<dyn SubmissionEndpoint>) -> Self {
        Self {
            sessions: SessionStore::new(endpoint),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for FormSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.sessions.resolve(&parts.headers))
    }
}

/// Attach the session cookie to a response when the session was just created.
pub fn with_session(session: &FormSession, response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    if let Some(cookie) = session.set_cookie() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

/// Run a submission on its own task so it still settles if the request that
/// triggered it is dropped (timeout, client gone).
pub async fn submit_detached(controller: Arc<FormController>) {
    // The outcome is recorded in the status, failures included
    if let Err(err) = tokio::spawn(async move { controller.submit().await }).await {
        error!("Submission task failed: {}", err);
    }
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<FieldError>,
}

// Current form and submission status for this visitor
pub async fn get_status(session: FormSession) -> Response {
    let snapshot = session.controller.snapshot();
    with_session(&session, Json(snapshot))
}

// Update a single field by its camelCase name
pub async fn update_field(
    session: FormSession,
    Path(name): Path<String>,
    ExtractJson(update): ExtractJson<FieldUpdate>,
) -> Response {
    let field = match name.parse::<FormField>() {
        Ok(field) => field,
        Err(err) => {
            warn!("Rejected field update: {}", err);
            return with_session(&session, StatusCode::NOT_FOUND);
        }
    };

    session.controller.update_field(field, update.value);
    with_session(&session, Json(session.controller.snapshot()))
}

// Submit this visitor's form if it passes validation
pub async fn submit_form(session: FormSession) -> Response {
    let errors = validate(&session.controller.form());
    if !errors.is_empty() {
        warn!("Submission blocked by {} invalid field(s)", errors.len());
        return with_session(
            &session,
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationResponse { errors }),
            ),
        );
    }

    info!("Received submit request");
    submit_detached(Arc::clone(&session.controller)).await;
    with_session(&session, Json(session.controller.snapshot()))
}
