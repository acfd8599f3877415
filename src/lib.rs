//! # infermedica-api
//!
//! Async client for a medical-diagnosis HTTP API.
//!
//! Two connectors share one transport. `ApiConnector` takes primitive
//! arguments and returns raw JSON. `ModelConnector` takes a `Diagnosis`
//! session and returns typed results; for `diagnosis` it writes the answer
//! back into the session you passed in.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use infermedica_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ApiError> {
//!     let api = ConnectorBuilder::new()
//!         .app_id("your-app-id")
//!         .app_key("your-app-key")
//!         .build_model()?;
//!
//!     let mut session = Diagnosis::new(Sex::Female, 35).with_generated_interview_id();
//!     session.add_symptom("s_21", ChoiceId::Present, Some(EvidenceSource::Initial));
//!
//!     let session = api.diagnosis(&mut session, RequestOptions::default()).await?;
//!     if let Some(question) = &session.question {
//!         println!("Next question: {}", question.text);
//!     }
//!     Ok(())
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod connector;
pub mod error;
pub mod execution;
pub mod registry;
pub mod request;
pub mod types;

pub use config::{ApiConfig, ApiVersion};
pub use connector::{ApiConnector, ConnectorBuilder, ModelConnector};
pub use error::ApiError;
pub use registry::{configure, configure_alias, get_api};

/// Commonly used items
pub mod prelude {
    pub use crate::config::{ApiConfig, ApiVersion, HttpConfig};
    pub use crate::connector::{ApiConnector, ConnectorBuilder, ModelConnector};
    pub use crate::error::{ApiError, HttpErrorKind};
    pub use crate::execution::http::transport::HttpTransport;
    pub use crate::registry::{configure, configure_alias, get_api};
    pub use crate::request::{
        ConceptFilter, ConceptQuery, ConceptType, RequestOptions, SearchConceptType, SearchFilter,
        SearchQuery,
    };
    pub use crate::types::{
        Age, AgeUnit, ChoiceId, Diagnosis, DiagnosticData, Evidence, EvidenceSource, FromJson,
        Sex,
    };
}
