use crate::common::header::HeaderMap;
use crate::common::method::Method;

/// An HTTP request.
/// The path and query are already split; only the path takes part in routing
/// and asset resolution, the query is carried but never interpreted.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Request {
    /// The path component of the request target.
    pub path: String,
    /// The query string, without the leading '?', if one was present.
    pub query: Option<String>,
    /// The method.
    pub method: Method,
    /// The headers.
    pub headers: HeaderMap,
    /// The body.
    pub body: Vec<u8>,
}
