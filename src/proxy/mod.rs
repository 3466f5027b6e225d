//! Live proxy execution
//!
//! One inbound description in, one outbound HTTP call, one normalized
//! result out. Nothing here is persisted.

mod executor;
mod validation;

pub use executor::{canonical_header_name, flatten_headers, ProxyExecutor, PROXY_TIMEOUT};
pub use validation::{validate_method, validate_proxy_request, validate_url, ALLOWED_METHODS};
