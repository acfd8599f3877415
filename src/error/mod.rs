//! Error Handling Module
//!
//! This module provides the error type shared by every layer of the client:
//! - Core error type (`ApiError`) and HTTP status classification (`HttpErrorKind`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use infermedica_api::error::{ApiError, HttpErrorKind};
//!
//! let error = ApiError::transport(404, "Not found");
//! assert_eq!(error.kind(), Some(HttpErrorKind::NotFound));
//! ```

mod conversions;
pub mod types;

pub use types::*;
