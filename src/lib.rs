//! # HC core
//!
//! Local single-user HTTP client server. It proxies outbound HTTP requests
//! on behalf of a browser UI and keeps named requests in folders for replay.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Browser UI (SPA)                      │
//! ├─────────────────────────────────────────────────────────┤
//! │             api (axum router, origin check)              │
//! ├──────────────────────────────┬──────────────────────────┤
//! │   proxy::ProxyExecutor       │     storage::Store       │
//! │   (reqwest, 30s timeout)     │     (SQLite)             │
//! └──────────────────────────────┴──────────────────────────┘
//! ```
//!
//! The executor and the store never call each other.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod proxy;
pub mod storage;

pub use error::{Error, ErrorKind, Result, StorageError};
pub use proxy::ProxyExecutor;
pub use storage::Store;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
