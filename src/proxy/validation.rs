//! Input checks applied before a proxy call is attempted

use crate::error::{Error, Result};
use crate::models::ProxyRequest;

/// Methods accepted for proxy execution, compared case-insensitively.
pub const ALLOWED_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

/// Literal, case-sensitive scheme prefix check. Not a full URL parse.
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::validation("URL is required"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::validation("URL must start with http:// or https://"));
    }
    Ok(())
}

pub fn validate_method(method: &str) -> Result<()> {
    let method = method.to_ascii_uppercase();
    if ALLOWED_METHODS.contains(&method.as_str()) {
        Ok(())
    } else {
        Err(Error::validation(format!("invalid HTTP method: {method}")))
    }
}

/// Runs every check and reports all failures at once.
pub fn validate_proxy_request(request: &ProxyRequest) -> Result<(), Vec<Error>> {
    let failures: Vec<Error> = [validate_url(&request.url), validate_method(&request.method)]
        .into_iter()
        .filter_map(Result::err)
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn url_requires_http_scheme() {
        let err = validate_url("ftp://x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "URL must start with http:// or https://");

        assert!(validate_url("https://x").is_ok());
        assert!(validate_url("http://localhost:8080/api").is_ok());
    }

    #[test]
    fn empty_url_is_required() {
        assert_eq!(validate_url("").unwrap_err().to_string(), "URL is required");
    }

    #[test]
    fn scheme_check_is_case_sensitive() {
        assert!(validate_url("HTTP://example.com").is_err());
        assert!(validate_url("Https://example.com").is_err());
    }

    #[test]
    fn methods_are_case_insensitive() {
        for method in ["get", "Post", "PUT", "delete", "patch", "HEAD", "options"] {
            assert!(validate_method(method).is_ok(), "{method} should be accepted");
        }
    }

    #[test]
    fn unknown_method_reports_uppercased_value() {
        let err = validate_method("trace").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "invalid HTTP method: TRACE");
        assert!(validate_method("").is_err());
    }

    #[test]
    fn proxy_request_collects_every_failure() {
        let request = ProxyRequest {
            method: "FETCH".into(),
            url: "ftp://x".into(),
            ..Default::default()
        };
        let messages: Vec<String> = validate_proxy_request(&request)
            .unwrap_err()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            messages,
            [
                "URL must start with http:// or https://",
                "invalid HTTP method: FETCH"
            ]
        );

        let ok = ProxyRequest {
            method: "get".into(),
            url: "https://example.com".into(),
            ..Default::default()
        };
        assert!(validate_proxy_request(&ok).is_ok());
    }
}
