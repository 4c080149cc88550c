use std::io::BufRead;

use crate::common::header::HeaderMap;
use crate::common::method::Method;
use crate::common::request::Request;
use crate::common::version;
use crate::parse::body::BodyParser;
use crate::parse::crlf_line::CrlfLineParser;
use crate::parse::error::ParsingError;
use crate::parse::headers::HeadersParser;
use crate::parse::parse::{Parse, ParseResult};
use crate::parse::parse::ParseStatus::{Done, IoErr};
use crate::parse::request::State::{Body, FirstLine, Headers};

/// Parser for requests. Progresses through the request line, the headers, and
/// the body, and may be resumed at any point after the underlying reader blocks.
pub struct RequestParser {
    state: State,
}

/// The method and split target parsed from a request line.
struct RequestLine {
    method: Method,
    path: String,
    query: Option<String>,
}

/// The state of a request parser.
enum State {
    /// Parsing the request line.
    FirstLine(CrlfLineParser),
    /// Parsing the headers.
    Headers(RequestLine, HeadersParser),
    /// Parsing the body.
    Body(RequestLine, HeaderMap, BodyParser),
}

impl RequestParser {
    /// Creates a new request parser.
    pub fn new() -> RequestParser {
        RequestParser { state: FirstLine(CrlfLineParser::new()) }
    }

    /// Returns true if this parser has read any data so far.
    pub fn has_data(&self) -> bool {
        match &self.state {
            FirstLine(parser) => parser.read_so_far() > 0,
            _ => true,
        }
    }
}

impl Parse<Request> for RequestParser {
    fn parse(self, reader: &mut impl BufRead) -> ParseResult<Request, Self> {
        let mut state = self.state;

        loop {
            let result = match state {
                FirstLine(parser) => match parser.parse(reader)? {
                    Done(line) => Done(Headers(parse_request_line(line)?, HeadersParser::new())),
                    IoErr(parser, err) => IoErr(FirstLine(parser), err),
                },
                Headers(first_line, parser) => match parser.parse(reader)? {
                    Done(headers) => {
                        let body_parser = BodyParser::new(&headers)?;
                        Done(Body(first_line, headers, body_parser))
                    }
                    IoErr(parser, err) => IoErr(Headers(first_line, parser), err),
                },
                Body(first_line, headers, parser) => match parser.parse(reader)? {
                    Done(body) => {
                        let RequestLine { method, path, query } = first_line;
                        return Ok(Done(Request { method, path, query, headers, body }));
                    }
                    IoErr(parser, err) => IoErr(Body(first_line, headers, parser), err),
                },
            };

            state = match result {
                Done(state) => state,
                IoErr(state, err) => return Ok(IoErr(RequestParser { state }, err)),
            }
        }
    }
}

/// Parses the given string as a request line. Verifies the HTTP version and
/// splits the target into a path and an optional query string.
fn parse_request_line(line: String) -> Result<RequestLine, ParsingError> {
    let mut split = line.split(' ');

    let method_raw = split.next().ok_or(ParsingError::BadSyntax)?;
    let target = split.next().ok_or(ParsingError::BadSyntax)?;
    let http_version = split.next().ok_or(ParsingError::BadSyntax)?;

    if !version::is_supported(http_version) {
        return Err(ParsingError::InvalidHttpVersion);
    }

    let method = Method::try_from_str(method_raw).ok_or(ParsingError::UnrecognizedMethod)?;
    let (path, query) = split_target(target);

    Ok(RequestLine { method, path, query })
}

/// Splits a request target at the first '?' into a path and an optional query.
fn split_target(target: &str) -> (String, Option<String>) {
    match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    }
}
