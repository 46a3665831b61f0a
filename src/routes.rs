use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{get_status, submit_form, update_field, AppState};
use crate::handlers::health_check;
use crate::handlers::page::{post_form, show_form};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(show_form).post(post_form))
        .route("/health", get(health_check));

    let api_routes = Router::new()
        .route("/api/status", get(get_status))
        .route("/api/fields/:name", put(update_field))
        .route("/api/submit", post(submit_form));

    page_routes.merge(api_routes).with_state(app_state)
}
