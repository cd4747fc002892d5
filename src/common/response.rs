use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

/// Lambda proxy-style response returned for every invocation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl HandlerResponse {
    pub fn success(job: Option<&Value>) -> Self {
        Self::new(200, job)
    }

    pub fn error() -> Self {
        Self::new(500, None)
    }

    fn new(status_code: u16, job: Option<&Value>) -> Self {
        Self {
            status_code,
            body: render_body(job),
            headers: default_headers(),
        }
    }
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

// Keys come out sorted since serde_json maps are ordered.
fn render_body(job: Option<&Value>) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    let rendered = match job {
        Some(job) => job.serialize(&mut ser),
        None => Value::Null.serialize(&mut ser),
    };
    match rendered {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| "null".to_string()),
        Err(_) => "null".to_string(),
    }
}
