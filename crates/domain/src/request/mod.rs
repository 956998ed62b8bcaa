//! HTTP Request domain types

mod body;
mod header;
mod method;
mod spec;

pub use body::{FilePart, MultipartForm, RequestBody};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use spec::{ApiRequest, RequestSpec, join_url};
