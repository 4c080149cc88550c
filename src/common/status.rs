/// An HTTP status.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Status {
    /// The status code.
    pub code: u16,
    /// The reason for the status.
    pub reason: &'static str,
}

macro_rules! status_codes {
    (
        $(
            $(#[$docs:meta])*
            ($name:ident, $num:expr, $phrase:expr);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $name: Status = Status { code: $num, reason: $phrase };
        )+

        /// Gets the status from the given status code.
        impl Status {
            pub fn from_code(code: u16) -> Option<Status> {
                match code {
                    $(
                    $num => Some($name),
                    )+
                    _ => None
                }
            }
        }
    }
}

status_codes! {
    (OK, 200, "OK");
    (NO_CONTENT, 204, "NO CONTENT");
    (MOVED_PERMANENTLY, 301, "MOVED PERMANENTLY");
    (FOUND, 302, "FOUND");
    (NOT_MODIFIED, 304, "NOT MODIFIED");
    (BAD_REQUEST, 400, "BAD REQUEST");
    (FORBIDDEN, 403, "FORBIDDEN");
    (NOT_FOUND, 404, "NOT FOUND");
    (METHOD_NOT_ALLOWED, 405, "METHOD NOT ALLOWED");
    (REQUEST_TIMEOUT, 408, "REQUEST TIMEOUT");
    (LENGTH_REQUIRED, 411, "LENGTH REQUIRED");
    (PAYLOAD_TOO_LARGE, 413, "PAYLOAD TOO LARGE");
    (URI_TOO_LONG, 414, "URI TOO LONG");
    (REQUEST_HEADER_FIELDS_TOO_LARGE, 431, "REQUEST HEADER FIELDS TOO LARGE");
    (INTERNAL_SERVER_ERROR, 500, "INTERNAL SERVER ERROR");
    (NOT_IMPLEMENTED, 501, "NOT IMPLEMENTED");
    (SERVICE_UNAVAILABLE, 503, "SERVICE UNAVAILABLE");
    (HTTP_VERSION_NOT_SUPPORTED, 505, "HTTP VERSION NOT SUPPORTED");
}
