use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a rejected login. The reason is for operators only; callers still get one generic error.
pub fn login_failed(reason: &str, username: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        username = %Redacted(username),
        reason,
        "Authentication failure"
    );
}

/// Log an attempt to act on a round owned by another user.
pub fn ownership_denied(user_id: i64, round_id: i64, action: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_OWNERSHIP_DENIED",
        %trace_id,
        user_id,
        round_id,
        action,
        "Round ownership check failed"
    );
}
