//! Request identity and span.
//!
//! Every request gets a trace id: an inbound `x-trace-id` is reused when it is
//! a UUID, anything else is replaced with a fresh v4. The id is stored in
//! request extensions as [`RequestId`], installed as the task-local
//! `trace_ctx` id, attached to an `http_request` span that instruments the
//! rest of the chain, and echoed back in the `x-trace-id` response header.
//!
//! Wrap it last so it runs first:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(RequestTrace)

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::HttpMessage;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::trace_ctx;

pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Route label used when no resource pattern matches the path.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Trace id of the current request, as stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Inbound id if it parses as a UUID, otherwise a fresh one.
fn resolve_trace_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .unwrap_or_else(Uuid::new_v4)
        .to_string()
}

/// Route pattern (`/api/rounds/{round_id}`) rather than the raw path, which may carry usernames.
pub(crate) fn route_label(req: &ServiceRequest) -> String {
    req.match_pattern()
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = resolve_trace_id(&req);
        req.extensions_mut().insert(RequestId(trace_id.clone()));

        let span = info_span!(
            "http_request",
            trace_id = %trace_id,
            method = %req.method(),
            route = %route_label(&req)
        );

        let fut = {
            let _entered = span.enter();
            self.service.call(req)
        };

        let header_value = HeaderValue::from_str(&trace_id).ok();
        Box::pin(trace_ctx::with_trace_id(
            trace_id,
            async move {
                let mut res = fut.await?;
                if let Some(value) = header_value {
                    res.headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Ok::<_, actix_web::Error>(res)
            }
            .instrument(span),
        ))
    }
}
