use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest request body accepted; every request type here is a handful of short fields.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

/// JSON body extractor whose parse failures render as problem details (400 `BAD_REQUEST`).
///
/// Field-level rules (lengths, ranges) are enforced by the services and
/// come back as 422 `VALIDATION_ERROR`.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn bad_body(detail: impl Into<String>) -> AppError {
    AppError::bad_request(ErrorCode::BadRequest, detail)
}

/// Drain the payload, refusing bodies over `MAX_BODY_BYTES`.
async fn read_capped(mut payload: Payload) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(trace_id = %trace_ctx::trace_id(), error = %e, "Failed to read request body chunk");
            bad_body("Failed to read request body")
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(bad_body(format!(
                "Request body exceeds {MAX_BODY_BYTES} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();

        Box::pin(async move {
            let body = read_capped(payload).await?;
            if body.is_empty() {
                return Err(bad_body("Request body is empty"));
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        error = %Redacted(&e.to_string()),
                        content_type = %content_type,
                        body_size = body.len(),
                        "JSON parsing failed"
                    );
                    bad_body(classify_json_error(&e))
                })
        })
    }
}

/// Client-safe description of a parse failure. Names a missing field, never echoes values.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => {
            let msg = error.to_string();
            match missing_field(&msg) {
                Some(field) => format!("Missing required field '{field}'"),
                None => "Invalid JSON: wrong types for one or more fields".to_string(),
            }
        }
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

/// Field name from serde's "missing field `x` at line ..." message.
fn missing_field(msg: &str) -> Option<&str> {
    let rest = msg.strip_prefix("missing field `")?;
    rest.split('`').next().filter(|f| !f.is_empty())
}
