//! Client configuration for the Trello API: the mapping definitions resource,
//! the API base url, and the application name shown during OAuth.

pub mod app_config;
pub mod app_name;
pub mod bundle;
pub mod endpoint;
pub mod error;

#[cfg(test)]
mod test;

pub use app_config::AppConfig;
pub use bundle::{Bundle, BundleInfo, InfoDictionary};
pub use error::AppError;
