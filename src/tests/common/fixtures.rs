use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    routing::post,
    Router,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::models::form::{FormField, RentalForm};

/// A request as seen by the stand-in endpoint
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

/// A local HTTP server playing the remote rental endpoint
pub struct StubEndpoint {
    pub url: String,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubEndpoint {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn store_rental(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    state.requests.lock().unwrap().push(CapturedRequest {
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });
    (state.status, state.body)
}

/// Start an endpoint on an ephemeral port that answers every POST with the
/// given status and body.
pub async fn spawn_endpoint(status: StatusCode, body: &'static str) -> StubEndpoint {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status,
        body,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/api/bike/store", post(store_rental))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubEndpoint {
        url: format!("http://{}/api/bike/store", addr),
        requests,
    }
}

/// A URL on which nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/bike/store", addr)
}

/// A form that satisfies every field constraint
pub fn valid_form() -> RentalForm {
    RentalForm {
        customer_name: "John Doe".to_string(),
        bike_location: "Store Location".to_string(),
        bike_id: "BIKE123".to_string(),
        credit_card_name: "John Doe".to_string(),
        credit_card_number: "4111111111111111".to_string(),
        credit_card_cvv: "123".to_string(),
    }
}

/// A browser stand-in: sends requests straight into the router and keeps the
/// session cookie the server hands out, like a real visitor would.
pub struct Visitor {
    app: Router,
    cookie: Option<String>,
}

/// Status, headers and body text of a response
pub struct VisitorResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl VisitorResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.text).unwrap()
    }
}

impl Visitor {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// A visitor that arrives already carrying `cookie`
    pub fn with_cookie(app: Router, cookie: &str) -> Self {
        Self {
            app,
            cookie: Some(cookie.to_string()),
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub async fn get(&mut self, uri: &str) -> VisitorResponse {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post(&mut self, uri: &str) -> VisitorResponse {
        self.send(Method::POST, uri, None, Body::empty()).await
    }

    pub async fn put_json(&mut self, uri: &str, body: &serde_json::Value) -> VisitorResponse {
        self.send(
            Method::PUT,
            uri,
            Some("application/json"),
            Body::from(body.to_string()),
        )
        .await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> VisitorResponse {
        let encoded = fields
            .iter()
            .map(|(name, value)| format!("{}={}", form_encode(name), form_encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Method::POST,
            uri,
            Some("application/x-www-form-urlencoded"),
            Body::from(encoded),
        )
        .await
    }

    /// Fill in every field of `form` through the JSON API
    pub async fn enter_form(&mut self, form: &RentalForm) {
        for field in FormField::ALL {
            let response = self
                .put_json(
                    &format!("/api/fields/{}", field.name()),
                    &serde_json::json!({ "value": form.get(field) }),
                )
                .await;
            assert_eq!(response.status, StatusCode::OK);
        }
    }

    async fn send(
        &mut self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> VisitorResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie.as_str());
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap().trim();
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        VisitorResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn form_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for b in text.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
