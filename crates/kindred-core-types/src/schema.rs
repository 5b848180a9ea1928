//! Canonical schema constants for structured logging
//!
//! Every log line emitted by the store uses these keys so that
//! downstream filters can rely on them.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_ENTITY_ID: &str = "entity_id";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_POST_ID: &str = "post_id";
pub const FIELD_COMMENT_ID: &str = "comment_id";
pub const FIELD_MOOD_ENTRY_ID: &str = "mood_entry_id";
pub const FIELD_SESSION_ID: &str = "session_id";
pub const FIELD_RESOURCE_ID: &str = "resource_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
