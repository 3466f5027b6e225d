//! HTTP adapter
//!
//! Thin axum layer that turns wire requests into calls on the
//! [`Store`] and the [`ProxyExecutor`], and typed failures into status codes.

mod error;
mod origin;
mod routes;
mod server;

pub use error::ApiError;
pub use origin::{is_allowed_origin, is_api_route, origin_guard, request_origin};
pub use routes::router;
pub use server::serve;

use crate::proxy::ProxyExecutor;
use crate::storage::Store;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub executor: ProxyExecutor,
    /// Port the UI is served from; API calls must originate from it.
    pub port: u16,
}

impl AppState {
    pub fn new(store: Store, executor: ProxyExecutor, port: u16) -> Self {
        Self {
            store,
            executor,
            port,
        }
    }
}
