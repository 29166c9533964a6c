//! HTTP request and response values exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `SudregClient` builds an
//! `HttpRequest` and parses an `HttpResponse` without touching the network;
//! only the `Transport` performs I/O. Every registry call is a GET, so the
//! request carries no method or body.

/// A fully resolved GET request: URL with query string, plus headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// First header value whose name matches `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response as returned by a `Transport`.
///
/// Non-2xx statuses are ordinary values here; interpreting them is the
/// client's job. The body is kept as raw bytes so that decoding failures are
/// reported by the parser, not the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
