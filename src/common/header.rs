use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::common::header::Header::{Custom, Standard};

/// A header. Is either a "Standard" header with a static string, or a "Custom" header with a uniquely allocated String.
/// The "Standard" variant is to reuse memory for frequently seen headers.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum Header {
    Standard(&'static str),
    Custom(String),
}

impl Header {
    pub fn as_str(&self) -> &str {
        match self {
            Header::Standard(str) => str,
            Header::Custom(str) => str.as_str(),
        }
    }
}

impl Display for Header {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Standard(s) => f.write_str(s),
            Custom(s) => f.write_str(s),
        }
    }
}

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($name:ident, $value:expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $name: Header = Header::Standard($value);
        )+


        impl From<String> for Header {
            /// Gets a header from the given string representing the header name.
            fn from(mut value: String) -> Header {
                value.make_ascii_lowercase();
                match value.as_str() {
                    $(
                    $value => $name,
                    )+
                    _ => Header::Custom(value)
                }
            }
        }
    }
}

impl From<&str> for Header {
    /// Gets a header from the given string representing the header name.
    fn from(value: &str) -> Header {
        Header::from(value.to_string())
    }
}

// The headers a static file server actually sees or sets.
standard_headers! {
    (ACCEPT, "accept");
    (ACCEPT_ENCODING, "accept-encoding");
    (ACCEPT_LANGUAGE, "accept-language");
    (CACHE_CONTROL, "cache-control");
    (CONNECTION, "connection");
    (CONTENT_ENCODING, "content-encoding");
    (CONTENT_LENGTH, "content-length");
    (CONTENT_TYPE, "content-type");
    (DATE, "date");
    (ETAG, "etag");
    (EXPIRES, "expires");
    (HOST, "host");
    (IF_MODIFIED_SINCE, "if-modified-since");
    (IF_NONE_MATCH, "if-none-match");
    (LAST_MODIFIED, "last-modified");
    (RANGE, "range");
    (REFERER, "referer");
    (SERVER, "server");
    (TRANSFER_ENCODING, "transfer-encoding");
    (USER_AGENT, "user-agent");
    (VARY, "vary");
}

/// Creates a map of headers.
/// ```
/// use sitebox::common::header::{CONNECTION, CONTENT_TYPE, CONTENT_LENGTH, Header, HeaderMapOps};
/// use sitebox::header_map;
///
/// let headers = header_map![
///    (CONNECTION, "keep-alive"),
///    (CONTENT_LENGTH, "5"),
///    ("custom-header", "hello"),
///    ("coNtEnt-TyPE", "text/css")
/// ];
///
/// assert!(headers.contains_header_value(&CONNECTION, "keep-alive"));
/// assert!(headers.contains_header_value(&CONTENT_LENGTH, "5"));
/// assert!(headers.contains_header_value(&CONTENT_TYPE, "text/css"));
/// assert!(headers.contains_header_value(&Header::Custom("custom-header".into()), "hello"));
/// ```
#[macro_export]
macro_rules! header_map {
    () => { $crate::common::header::HeaderMap::new() };
    ($(($header:expr, $value:expr)),+ $(,)?) => {
        <$crate::common::header::HeaderMap as $crate::common::header::HeaderMapOps>::from_pairs(vec![
            $(($header.into(), $value.into()),)+
        ])
    }
}

/// Operations for a header map.
pub trait HeaderMapOps {
    /// Gets a header map from the given vector of header value and key pairs.
    fn from_pairs(header_values: Vec<(Header, String)>) -> Self;
    /// Adds a header to the map.
    fn add_header(&mut self, k: Header, v: String);
    /// Checks if the map contains the given header and corresponding header value.
    fn contains_header_value(&self, k: &Header, v: &str) -> bool;
    /// Gets the first value for the given header.
    fn get_first_header_value(&self, k: &Header) -> Option<&String>;
}

/// A multimap of headers to values.
pub type HeaderMap = HashMap<Header, Vec<String>>;

impl HeaderMapOps for HeaderMap {
    fn from_pairs(header_values: Vec<(Header, String)>) -> HeaderMap {
        header_values.into_iter().fold(HashMap::new(), |mut m, (header, value)| {
            m.add_header(header, value);
            m
        })
    }

    fn add_header(&mut self, k: Header, v: String) {
        self.entry(k).or_insert_with(Vec::new).push(v)
    }

    fn contains_header_value(&self, k: &Header, v: &str) -> bool {
        if let Some(values) = self.get(k) {
            return values.iter().any(|value| value == v);
        }
        false
    }

    fn get_first_header_value(&self, k: &Header) -> Option<&String> {
        self.get(k)?.first()
    }
}
