use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::{route_label, RequestId};
use crate::trace_ctx::UNKNOWN_TRACE_ID;

/// Requests slower than this are flagged `slow = true`.
pub const SLOW_REQUEST_MS: u128 = 500;

/// What one finished request looked like.
struct Completion {
    method: String,
    route: String,
    trace_id: String,
    status: StatusCode,
    duration_ms: u128,
}

impl Completion {
    /// Level follows the status class.
    fn emit(&self) {
        let status = self.status.as_u16();
        let slow = self.duration_ms >= SLOW_REQUEST_MS;
        if self.status.is_server_error() {
            error!(http.method = %self.method, http.route = %self.route, http.status_code = status, duration_ms = self.duration_ms as u64, slow, trace_id = %self.trace_id, "request_completed");
        } else if self.status.is_client_error() || slow {
            warn!(http.method = %self.method, http.route = %self.route, http.status_code = status, duration_ms = self.duration_ms as u64, slow, trace_id = %self.trace_id, "request_completed");
        } else {
            info!(http.method = %self.method, http.route = %self.route, http.status_code = status, duration_ms = self.duration_ms as u64, slow, trace_id = %self.trace_id, "request_completed");
        }
    }
}

/// Emits one `request_completed` event per request, keyed by route pattern.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let route = route_label(&req);
        let trace_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| UNKNOWN_TRACE_ID.to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            Completion {
                method,
                route,
                trace_id,
                status,
                duration_ms: start.elapsed().as_millis(),
            }
            .emit();

            result
        })
    }
}
