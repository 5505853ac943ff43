//! Canonical schema constants for structured logging and events
//!
//! Each `FIELD_*` constant names a field emitted by the `log_op_*` macros or
//! the cycle guard's debug event. `tracing` takes field names as literal
//! identifiers, so emitters spell them out; the capture layer and log
//! assertions read events back through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison context
pub const FIELD_SIDE: &str = "side";
pub const FIELD_PATH: &str = "path";
pub const FIELD_LEFT_TYPE: &str = "left_type";
pub const FIELD_RIGHT_TYPE: &str = "right_type";

// Result sizes
pub const FIELD_FIELDS_LEN: &str = "fields_len";
pub const FIELD_IS_SAME: &str = "is_same";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
