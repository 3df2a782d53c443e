//! Request interceptors
//!
//! Composed in order by [`crate::router::create_router`]:
//! 1. [`request_id`] tags the request and echoes the id on the response.
//! 2. [`access_log`] opens a span carrying the id, method, path, peer and
//!    user agent, and logs one line per completed response.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, Request};
use axum::http::header::USER_AGENT;
use axum::http::{HeaderName, HeaderValue, Response, StatusCode};
use axum::middleware::Next;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, TraceLayer};
use tracing::{debug, error, info, info_span, Span};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id attached to the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Fresh time-ordered id for requests that did not bring one.
pub fn next_request_id() -> String {
    Uuid::now_v7().to_string()
}

/// Reuse a non-empty inbound `X-Request-Id`, otherwise generate one.
pub async fn request_id(mut req: Request, next: Next) -> axum::response::Response {
    let inbound = req
        .headers()
        .get(&X_REQUEST_ID)
        .filter(|value| !value.is_empty())
        .cloned();

    let header = match inbound {
        Some(value) => value,
        None => {
            let value = HeaderValue::from_str(&next_request_id())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            req.headers_mut().insert(X_REQUEST_ID.clone(), value.clone());
            value
        }
    };

    let id = String::from_utf8_lossy(header.as_bytes()).into_owned();
    req.extensions_mut().insert(RequestId(id));

    let mut res = next.run(req).await;
    res.headers_mut().insert(X_REQUEST_ID.clone(), header);
    res
}

fn access_span(req: &Request<Body>) -> Span {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.as_str())
        .unwrap_or("unknown");
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    info_span!(
        "http",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %remote_addr,
        user_agent = %user_agent,
    )
}

fn log_response(res: &Response<Body>, latency: Duration, _span: &Span) {
    info!(
        status = res.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        "request completed"
    );
}

/// A 503 is how `/healthz` reports draining; load balancers poll it.
fn is_routine_failure(class: &ServerErrorsFailureClass) -> bool {
    matches!(
        class,
        ServerErrorsFailureClass::StatusCode(status) if *status == StatusCode::SERVICE_UNAVAILABLE
    )
}

fn log_failure(class: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    let latency_ms = latency.as_millis() as u64;
    if is_routine_failure(&class) {
        debug!(classification = %class, latency_ms, "service unavailable");
    } else {
        error!(classification = %class, latency_ms, "request failed");
    }
}

pub type AccessLogLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    fn(&Request<Body>) -> Span,
    DefaultOnRequest,
    fn(&Response<Body>, Duration, &Span),
    DefaultOnBodyChunk,
    DefaultOnEos,
    fn(ServerErrorsFailureClass, Duration, &Span),
>;

/// Structured access log, one line per response.
pub fn access_log() -> AccessLogLayer {
    TraceLayer::new_for_http()
        .make_span_with(access_span as fn(&Request<Body>) -> Span)
        .on_response(log_response as fn(&Response<Body>, Duration, &Span))
        .on_failure(log_failure as fn(ServerErrorsFailureClass, Duration, &Span))
}
