use axum::{extract::Form, http::StatusCode, response::Html, response::Response};
use std::sync::Arc;
use tracing::{info, warn};

use crate::handlers::api::{submit_detached, with_session};
use crate::models::form::FormInput;
use crate::session::FormSession;
use crate::validation::validate;
use crate::views::render_page;

// Render this visitor's form
pub async fn show_form(session: FormSession) -> Response {
    let page = render_page(&session.controller.snapshot(), &[]);
    with_session(&session, Html(page))
}

// Apply the posted fields, then submit if every constraint holds
pub async fn post_form(session: FormSession, Form(input): Form<FormInput>) -> Response {
    for (field, value) in input.into_updates() {
        session.controller.update_field(field, value);
    }

    let errors = validate(&session.controller.form());
    if !errors.is_empty() {
        warn!("Form posted with {} invalid field(s)", errors.len());
        let page = render_page(&session.controller.snapshot(), &errors);
        return with_session(&session, (StatusCode::UNPROCESSABLE_ENTITY, Html(page)));
    }

    info!("Form posted, submitting rental");
    submit_detached(Arc::clone(&session.controller)).await;
    let page = render_page(&session.controller.snapshot(), &[]);
    with_session(&session, Html(page))
}
