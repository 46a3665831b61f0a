//! Per-visitor form controllers, keyed by a session cookie.
//!
//! Each browser gets its own `FormController`, so one visitor's card details
//! are never rendered to, or submitted with, another visitor's fields.

use axum::http::{header, HeaderMap, HeaderValue};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::client::SubmissionEndpoint;
use crate::controller::FormController;

pub const SESSION_COOKIE: &str = "rental_session";

/// Sessions untouched for this long are dropped with their form.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct Session {
    controller: Arc<FormController>,
    last_seen: Instant,
}

/// The controller serving one request, and whether its cookie must be set.
pub struct FormSession {
    pub id: String,
    pub controller: Arc<FormController>,
    pub is_new: bool,
}

impl FormSession {
    /// `Set-Cookie` value for a freshly created session.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        );
        HeaderValue::from_str(&cookie).ok()
    }
}

pub struct SessionStore {
    endpoint: Arc<dyn SubmissionEndpoint>,
    idle_timeout: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(endpoint: Arc<dyn SubmissionEndpoint>) -> Self {
        Self::with_idle_timeout(endpoint, SESSION_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(endpoint: Arc<dyn SubmissionEndpoint>, idle_timeout: Duration) -> Self {
        Self {
            endpoint,
            idle_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the session named by the request's cookie, or start a new one.
    /// Unknown or expired ids are never adopted; a fresh id is issued instead.
    pub fn resolve(&self, headers: &HeaderMap) -> FormSession {
        let requested = session_id(headers);
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());

        let timeout = self.idle_timeout;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen.elapsed() < timeout);
        if sessions.len() < before {
            debug!("Expired {} idle form session(s)", before - sessions.len());
        }

        if let Some(id) = requested {
            if let Some(session) = sessions.get_mut(&id) {
                session.last_seen = Instant::now();
                return FormSession {
                    id,
                    controller: Arc::clone(&session.controller),
                    is_new: false,
                };
            }
        }

        let id = generate_session_id();
        let controller = Arc::new(FormController::new(Arc::clone(&self.endpoint)));
        sessions.insert(
            id.clone(),
            Session {
                controller: Arc::clone(&controller),
                last_seen: Instant::now(),
            },
        );
        info!("Started form session ({} active)", sessions.len());

        FormSession {
            id,
            controller,
            is_new: true,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 128 random bits, hex encoded
fn generate_session_id() -> String {
    format!("{:032x}", rand::thread_rng().gen::<u128>())
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}
