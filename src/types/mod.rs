//! Domain types for the diagnosis API.

pub mod concepts;
pub mod diagnosis;
pub mod evidence;
mod from_json;
pub mod results;

pub use concepts::*;
pub use diagnosis::*;
pub use evidence::*;
pub use from_json::FromJson;
pub use results::*;

use std::collections::HashMap;

/// Free-form supplementary request data, opaque to the client.
pub type Extras = serde_json::Map<String, serde_json::Value>;

/// URL query parameters; array values are sent as repeated keys.
pub type QueryParams = serde_json::Map<String, serde_json::Value>;

/// HTTP header name/value pairs.
pub type Headers = HashMap<String, String>;
