//! Connectors
//!
//! Two layers over one transport:
//! - `ApiConnector`: primitive arguments in, raw JSON out
//! - `ModelConnector`: session and typed models in and out, delegating to
//!   `ApiConnector` for every call

pub mod basic;
pub mod builder;
pub mod model;

pub use basic::ApiConnector;
pub use builder::ConnectorBuilder;
pub use model::ModelConnector;
