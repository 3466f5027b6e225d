//! Data models for the request store and the proxy executor
//!
//! These are the JSON shapes exchanged with the UI.

pub mod error_response;
pub mod folder;
pub mod proxy;
pub mod request;

pub use error_response::*;
pub use folder::*;
pub use proxy::*;
pub use request::*;

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Record kinds owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Folder,
    Request,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Folder => f.write_str("folder"),
            Entity::Request => f.write_str("request"),
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
