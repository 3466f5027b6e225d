//! Outbound HTTP execution

use crate::error::{Error, Result};
use crate::models::{Headers, ProxyRequest, ProxyResponse};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Method;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

/// Applies to the whole call, redirects and body download included.
pub const PROXY_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 10;
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Performs exactly one outbound call per [`execute`](Self::execute).
///
/// Holds only the HTTP client (and its connection pool); no per-call state
/// survives a call, so one executor can be shared by all handlers.
#[derive(Clone)]
pub struct ProxyExecutor {
    client: reqwest::Client,
    timeout: Duration,
}

impl ProxyExecutor {
    pub fn new() -> Result<Self> {
        Self::with_timeout(PROXY_TIMEOUT)
    }

    pub(crate) fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| Error::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    /// Send one request and normalize the final response of the redirect
    /// chain. Never retried.
    ///
    /// `duration_ms` covers sending, waiting and reading the body, but not
    /// building the request.
    pub async fn execute(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: &str,
    ) -> Result<ProxyResponse> {
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::Transport(format!("invalid HTTP method: {method}")))?;
        let header_map = build_header_map(headers, !body.is_empty())?;

        let mut builder = self.client.request(method.clone(), url).headers(header_map);
        if !body.is_empty() {
            builder = builder.body(body.to_owned());
        }
        let request = builder.build().map_err(|e| self.classify(e))?;

        tracing::debug!(%method, url, "Dispatching outbound request");
        let started = Instant::now();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let err = self.classify(e);
                tracing::warn!(%method, url, error = %err, "Outbound request failed");
                return Err(err);
            }
        };
        let status_code = response.status().as_u16();
        let response_headers = flatten_headers(response.headers());
        let bytes = response.bytes().await.map_err(|e| {
            let err = self.classify(e);
            tracing::warn!(%method, url, error = %err, "Reading response body failed");
            err
        })?;

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            %method,
            url,
            status = status_code,
            bytes = bytes.len(),
            duration_ms,
            "Outbound request completed"
        );

        Ok(ProxyResponse {
            status_code,
            headers: response_headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            duration_ms,
        })
    }

    pub async fn proxy(&self, request: &ProxyRequest) -> Result<ProxyResponse> {
        self.execute(&request.method, &request.url, &request.headers, &request.body)
            .await
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else if err.is_builder() {
            Error::Transport(error_chain(&err))
        } else {
            Error::Network(error_chain(&err))
        }
    }
}

/// Every caller header is applied; a non-empty body without a content type
/// (missing or blank) is sent as JSON.
fn build_header_map(headers: &Headers, has_body: bool) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len() + 1);
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::Transport(format!("invalid header name: {name}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| Error::Transport(format!("invalid value for header {name}")))?;
        map.insert(header_name, header_value);
    }
    let content_type_unset = map.get(CONTENT_TYPE).map_or(true, |v| v.is_empty());
    if has_body && content_type_unset {
        map.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    }
    Ok(map)
}

/// Collapse a multi-map into one string per header, joining repeated values
/// with `", "`. Lossy: the original value boundaries are not recoverable.
pub fn flatten_headers(headers: &HeaderMap) -> Headers {
    let mut flat = Headers::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        flat.insert(canonical_header_name(name.as_str()), joined);
    }
    flat
}

/// `content-type` -> `Content-Type`.
pub fn canonical_header_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
