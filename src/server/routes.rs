//! HTTP routing for the dashboard API.
//!
//! Routing is independent of the socket layer: [`Api::handle`] maps a method,
//! URL and body to an [`ApiResponse`], which the accept loop turns into a
//! tiny_http response.

use crate::constants::MAX_SESSIONS;
use crate::dashboard::{Controller, Event, Layout, SelectOption, ViewUpdate, views};
use crate::data::{Dataset, country_options_for};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tiny_http::Method;

/// Dashboard page served at `/`
const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub type SessionId = u64;

/// Transport-independent response
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::error(500, "serialization failed")
            }
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

/// Body of `POST /api/sessions`
#[derive(Serialize)]
struct SessionCreated<'u> {
    session: SessionId,
    layout: &'u Layout,
    update: &'u ViewUpdate,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    rows: usize,
    years: usize,
    continents: usize,
}

struct Session<'a> {
    controller: Controller<'a>,
    last_used: u64,
}

/// Live sessions with a capacity bound. Inserting past capacity evicts the
/// least recently used session.
struct SessionRegistry<'a> {
    sessions: HashMap<SessionId, Session<'a>>,
    capacity: usize,
    clock: u64,
}

impl<'a> SessionRegistry<'a> {
    fn new(capacity: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Insert a session, returning the id of the session evicted to make room
    fn insert(&mut self, id: SessionId, controller: Controller<'a>) -> Option<SessionId> {
        let evicted = if self.sessions.len() >= self.capacity {
            let oldest = self
                .sessions
                .iter()
                .min_by_key(|(_, session)| session.last_used)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                self.sessions.remove(&oldest);
            }
            oldest
        } else {
            None
        };

        let last_used = self.tick();
        self.sessions.insert(
            id,
            Session {
                controller,
                last_used,
            },
        );
        evicted
    }

    /// Controller for `id`, marked as just used
    fn touch(&mut self, id: SessionId) -> Option<&mut Controller<'a>> {
        let now = self.tick();
        let session = self.sessions.get_mut(&id)?;
        session.last_used = now;
        Some(&mut session.controller)
    }

    fn remove(&mut self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

/// Session registry plus the shared dataset
pub struct Api<'a> {
    dataset: &'a Dataset,
    default_continent: String,
    sessions: Mutex<SessionRegistry<'a>>,
    next_session: AtomicU64,
}

impl<'a> Api<'a> {
    pub fn new(dataset: &'a Dataset, default_continent: impl Into<String>) -> Self {
        Self {
            dataset,
            default_continent: default_continent.into(),
            sessions: Mutex::new(SessionRegistry::new(MAX_SESSIONS)),
            next_session: AtomicU64::new(1),
        }
    }

    /// Bound the number of live sessions (at least one)
    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.sessions.get_mut().capacity = max.max(1);
        self
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Route one request
    pub fn handle(&self, method: &Method, url: &str, body: &str) -> ApiResponse {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (url, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match (method, segments.as_slice()) {
            (Method::Get, []) | (Method::Get, ["index.html"]) => ApiResponse::html(INDEX_HTML),
            (Method::Get, ["api", "health"]) => self.health(),
            (Method::Get, ["api", "options", "countries"]) => self.country_options(query),
            (Method::Post, ["api", "sessions"]) => self.create_session(),
            (Method::Post, ["api", "sessions", id, "events"]) => match parse_session(id) {
                Some(id) => self.session_event(id, body),
                None => ApiResponse::error(404, "unknown session"),
            },
            (Method::Delete, ["api", "sessions", id]) => match parse_session(id) {
                Some(id) => self.close_session(id),
                None => ApiResponse::error(404, "unknown session"),
            },
            (_, [])
            | (_, ["index.html"])
            | (_, ["api", "health"])
            | (_, ["api", "options", "countries"])
            | (_, ["api", "sessions"])
            | (_, ["api", "sessions", _])
            | (_, ["api", "sessions", _, "events"]) => {
                ApiResponse::error(405, "method not allowed")
            }
            _ => ApiResponse::error(404, "not found"),
        }
    }

    fn health(&self) -> ApiResponse {
        ApiResponse::json(
            200,
            &Health {
                status: "ok",
                rows: self.dataset.row_count(),
                years: self.dataset.distinct_years().len(),
                continents: self.dataset.distinct_continents().len(),
            },
        )
    }

    fn country_options(&self, query: Option<&str>) -> ApiResponse {
        let Some(continent) = query.and_then(|q| query_param(q, "continent")) else {
            return ApiResponse::error(400, "missing continent parameter");
        };
        let options: Vec<SelectOption> =
            views::country_select_options(&country_options_for(self.dataset.records(), &continent));
        ApiResponse::json(200, &options)
    }

    fn create_session(&self) -> ApiResponse {
        let controller = if self.dataset.has_continent(&self.default_continent) {
            Controller::new(self.dataset, &self.default_continent)
        } else {
            Controller::with_defaults(self.dataset)
        };
        let layout = controller.layout();
        let update = controller.render_all();

        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        if let Some(evicted) = self.sessions.lock().insert(id, controller) {
            tracing::info!(session = evicted, "Session evicted");
        }
        tracing::info!(session = id, "Session created");

        ApiResponse::json(
            201,
            &SessionCreated {
                session: id,
                layout: &layout,
                update: &update,
            },
        )
    }

    fn session_event(&self, id: SessionId, body: &str) -> ApiResponse {
        let event: Event = match serde_json::from_str(body) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(session = id, "Rejected event body: {}", e);
                return ApiResponse::error(400, &format!("invalid event: {}", e));
            }
        };

        let mut sessions = self.sessions.lock();
        let Some(controller) = sessions.touch(id) else {
            return ApiResponse::error(404, "unknown session");
        };
        let update = controller.handle(&event);
        drop(sessions);

        ApiResponse::json(200, &update)
    }

    fn close_session(&self, id: SessionId) -> ApiResponse {
        if self.sessions.lock().remove(id) {
            tracing::info!(session = id, "Session closed");
            ApiResponse::empty(204)
        } else {
            ApiResponse::error(404, "unknown session")
        }
    }
}

fn parse_session(segment: &str) -> Option<SessionId> {
    segment.parse().ok()
}

/// Decoded value of `key` in a query string
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k != key {
            return None;
        }
        // Form encoding uses '+' for spaces
        urlencoding::decode(&v.replace('+', " "))
            .ok()
            .map(|v| v.into_owned())
    })
}
