use serde::Serialize;

/// One parsed access log line.
///
/// All fields are carried as the raw strings the log contains; `status` is
/// constrained to three digits by the grammar but not converted. Field
/// order matches [`LogRecord::COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub remote_addr: String,
    pub remote_user: String,
    pub time_local: String,
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub status: String,
    pub body_bytes_sent: String,
    pub http_referer: String,
    pub http_user_agent: String,
    pub request_length: String,
    pub request_time: String,
    pub upstream_name: String,
    pub upstream_other: String,
    pub upstream_addr: String,
    pub upstream_response_length: String,
    pub upstream_response_time: String,
    pub upstream_status: String,
    pub request_id: String,
}

impl LogRecord {
    /// CSV header names, in field order.
    pub const COLUMNS: [&'static str; 19] = [
        "remote_addr",
        "remote_user",
        "time_local",
        "method",
        "path",
        "protocol",
        "status",
        "body_bytes_sent",
        "http_referer",
        "http_user_agent",
        "request_length",
        "request_time",
        "upstream_name",
        "upstream_other",
        "upstream_addr",
        "upstream_response_length",
        "upstream_response_time",
        "upstream_status",
        "request_id",
    ];
}
