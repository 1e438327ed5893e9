//! # logledger-parser
//!
//! Line grammar for nginx access logs in the "combined" format extended
//! with upstream proxy fields:
//!
//! ```text
//! $remote_addr - $remote_user [$time_local] "$request" $status $body_bytes_sent
//! "$http_referer" "$http_user_agent" $request_length $request_time
//! [$upstream_name] [$upstream_other] $upstream_addr $upstream_response_length
//! $upstream_response_time $upstream_status $request_id
//! ```
//!
//! [`parse_line`] matches one line against the grammar and produces a
//! [`LogRecord`]; lines that do not match yield `None` and are dropped by
//! callers without diagnostics.

mod line;
mod record;

pub use line::parse_line;
pub use record::LogRecord;
