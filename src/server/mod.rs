//! Local HTTP server for the dashboard.
//!
//! A blocking tiny_http accept loop serves the dashboard page and the JSON
//! API. Each request runs to completion before the next one is taken, so
//! session state never sees concurrent events.
//!
//! ## Routes
//!
//! - `GET /` - dashboard page
//! - `GET /api/health` - dataset summary
//! - `GET /api/options/countries?continent=..` - country options
//! - `POST /api/sessions` - new session (layout + full render)
//! - `POST /api/sessions/{id}/events` - apply an event, return invalidated views
//! - `DELETE /api/sessions/{id}` - drop a session

mod routes;

pub use routes::{Api, ApiResponse, SessionId};

use crate::constants::{ACCEPT_POLL_MS, MAX_REQUEST_BODY_BYTES};
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tiny_http::{Header, Request, Response, Server, StatusCode};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

/// Helper to create HTTP headers, returning None if the bytes are invalid
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

pub struct DashboardServer {
    server: Server,
    shutdown: Arc<AtomicBool>,
}

impl DashboardServer {
    pub fn bind(addr: &str) -> Result<Self, ServerError> {
        let server = Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            server,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Bound socket address (resolves port 0 binds)
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Flag that stops [`run`](Self::run) when set
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    /// Serve requests until the shutdown flag is set or the listener fails
    pub fn run(&self, api: &Api<'_>) {
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            match self
                .server
                .recv_timeout(Duration::from_millis(ACCEPT_POLL_MS))
            {
                Ok(Some(request)) => handle_request(request, api),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("Server accept failed: {}", e);
                    break;
                }
            }
        }
        tracing::info!("Server stopped");
    }
}

fn handle_request(mut request: Request, api: &Api<'_>) {
    let mut body = String::new();
    if let Err(e) = request
        .as_reader()
        .take(MAX_REQUEST_BODY_BYTES)
        .read_to_string(&mut body)
    {
        tracing::debug!("Unreadable request body: {}", e);
        respond(request, ApiResponse::error(400, "unreadable body"));
        return;
    }

    let method = request.method().clone();
    let url = request.url().to_string();
    let response = api.handle(&method, &url, &body);
    tracing::debug!(%method, %url, status = response.status, "Handled request");

    respond(request, response);
}

fn respond(request: Request, response: ApiResponse) {
    let mut reply = Response::from_string(response.body)
        .with_status_code(StatusCode(response.status));
    if let Some(header) = create_header(&b"Content-Type"[..], response.content_type.as_bytes()) {
        reply = reply.with_header(header);
    }
    if let Err(e) = request.respond(reply) {
        tracing::debug!("Failed to send response: {}", e);
    }
}
