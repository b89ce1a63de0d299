pub mod api;
pub mod cache;
pub mod config;
pub mod diff;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod identity;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{CodecoachError, Result};
pub use identity::DocumentIdentity;
pub use pipeline::{Pipeline, QueryResult, Summary};
