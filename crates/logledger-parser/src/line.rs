use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::record::LogRecord;

lazy_static! {
    // Anchored grammar for one access log line. The ident field between
    // remote_addr and remote_user is matched but never captured.
    static ref LOG_RE: Regex = Regex::new(concat!(
        r"^(?P<remote_addr>\S+)\s+\S+\s+(?P<remote_user>\S+)\s+",
        r"\[(?P<time_local>[^\]]+)\]\s+",
        r#""(?P<request>[^"]*)"\s+"#,
        r"(?P<status>\d{3})\s+",
        r"(?P<body_bytes_sent>\S+)\s+",
        r#""(?P<http_referer>[^"]*)"\s+"#,
        r#""(?P<http_user_agent>[^"]*)"\s+"#,
        r"(?P<request_length>\S+)\s+",
        r"(?P<request_time>\S+)\s+",
        r"(?P<upstream_name>\[[^\]]*\])\s+",
        r"(?P<upstream_other>\[[^\]]*\])\s+",
        r"(?P<upstream_addr>\S+)\s+",
        r"(?P<upstream_response_length>\S+)\s+",
        r"(?P<upstream_response_time>\S+)\s+",
        r"(?P<upstream_status>\S+)\s+",
        r"(?P<request_id>\S+)\s*$",
    ))
    .expect("access log pattern compiles");
}

fn group(caps: &Captures, name: &str) -> String {
    caps[name].to_string()
}

/// Parse a single log line (without its trailing newline) into a
/// [`LogRecord`].
///
/// Returns `None` for lines that do not match the grammar. The quoted
/// request field is split into at most three space-separated tokens; a
/// short request like `"GET /health"` leaves the missing tokens empty.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps = LOG_RE.captures(line)?;

    // Request looks like: GET /some/path HTTP/1.1
    let request = &caps["request"];
    let mut tokens = request.splitn(3, ' ');
    let method = tokens.next().unwrap_or("").to_string();
    let path = tokens.next().unwrap_or("").to_string();
    let protocol = tokens.next().unwrap_or("").to_string();

    Some(LogRecord {
        remote_addr: group(&caps, "remote_addr"),
        remote_user: group(&caps, "remote_user"),
        time_local: group(&caps, "time_local"),
        method,
        path,
        protocol,
        status: group(&caps, "status"),
        body_bytes_sent: group(&caps, "body_bytes_sent"),
        http_referer: group(&caps, "http_referer"),
        http_user_agent: group(&caps, "http_user_agent"),
        request_length: group(&caps, "request_length"),
        request_time: group(&caps, "request_time"),
        upstream_name: group(&caps, "upstream_name"),
        upstream_other: group(&caps, "upstream_other"),
        upstream_addr: group(&caps, "upstream_addr"),
        upstream_response_length: group(&caps, "upstream_response_length"),
        upstream_response_time: group(&caps, "upstream_response_time"),
        upstream_status: group(&caps, "upstream_status"),
        request_id: group(&caps, "request_id"),
    })
}
