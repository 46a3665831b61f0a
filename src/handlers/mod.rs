pub mod api;
pub mod page;

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
