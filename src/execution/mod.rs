//! Request execution: HTTP transport and header plumbing.

pub mod http;
