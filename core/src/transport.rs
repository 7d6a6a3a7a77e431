//! Blocking network transport backed by `ureq`.

use std::time::Duration;

use tracing::debug;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Production `Transport`: one blocking `ureq` call per request.
///
/// Status-as-error is disabled so 4xx/5xx responses come back as data and
/// the client can surface the server's body as the diagnostic.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(crate::config::DEFAULT_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = &self.agent;
        let body = req.body.as_deref();

        let result = match req.method {
            HttpMethod::Get => with_headers_no_body(agent.get(&req.url), &req.headers).call(),
            HttpMethod::Delete => {
                with_headers_no_body(agent.delete(&req.url), &req.headers).call()
            }
            HttpMethod::Post => {
                send(with_headers_with_body(agent.post(&req.url), &req.headers), body)
            }
            HttpMethod::Patch => {
                send(with_headers_with_body(agent.patch(&req.url), &req.headers), body)
            }
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError(format!("failed to read response body: {e}")))?;
        let body = decode_body(bytes);

        debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Bodies that are not valid UTF-8 are decoded lossily so the status survives.
fn decode_body(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn with_headers_no_body(
    mut builder: ureq::RequestBuilder<ureq::typestate::WithoutBody>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<ureq::typestate::WithoutBody> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn with_headers_with_body(
    mut builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<ureq::typestate::WithBody> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_body_is_kept_verbatim() {
        assert_eq!(decode_body(br#"{"error":"x"}"#.to_vec()), r#"{"error":"x"}"#);
    }

    #[test]
    fn invalid_utf8_body_is_decoded_lossily() {
        let body = decode_body(vec![b'b', b'a', b'd', 0xff, b'!']);
        assert_eq!(body, "bad\u{fffd}!");
    }
}
