use std::io::BufRead;

use crate::common::header;
use crate::common::header::{HeaderMap, HeaderMapOps};
use crate::parse::body::BodyParser::{Empty, WithSize};
use crate::parse::deframe::bytes::BytesDeframer;
use crate::parse::deframe::deframe::Deframe;
use crate::parse::error::ParsingError;
use crate::parse::error_take::ReadExt;
use crate::parse::parse::{Parse, ParseResult};
use crate::parse::parse::ParseStatus::Done;

/// The maximum size of a request body.
const MAX_BODY_SIZE: usize = 3 * 1024 * 1024; // 3 megabytes

/// Parser for a request body.
/// A static asset server accepts no uploads, so only two framings exist: a
/// content-length sized body (read and discarded so keep-alive framing stays
/// intact) and no body at all. Chunked transfer encoding is rejected.
pub enum BodyParser {
    WithSize(BytesDeframer),
    Empty,
}

impl BodyParser {
    /// Creates a new body parser from the headers of a request.
    pub fn new(headers: &HeaderMap) -> Result<BodyParser, ParsingError> {
        if is_chunked_transfer_encoding(headers) {
            return Err(ParsingError::UnsupportedTransferEncoding);
        }
        if let Some(size) = get_content_length(headers) {
            let size = size?;
            if size > MAX_BODY_SIZE {
                return Err(ParsingError::ContentLengthTooLarge);
            }
            Ok(WithSize(BytesDeframer::new(size)))
        } else {
            Ok(Empty)
        }
    }

    /// Gets the size of the body read so far.
    fn read_so_far(&self) -> usize {
        match self {
            WithSize(parser) => parser.read_so_far(),
            Empty => 0,
        }
    }
}

/// Gets the value of a content-length header from the given header map. May return None if there's
/// no content-length header, or an error if the content-length value can not be parsed.
fn get_content_length(headers: &HeaderMap) -> Option<Result<usize, ParsingError>> {
    headers.get_first_header_value(&header::CONTENT_LENGTH)
        .map(|value| value.parse().map_err(|_| ParsingError::InvalidHeaderValue))
}

/// Checks if the header map has a chunked transfer encoding header value.
fn is_chunked_transfer_encoding(headers: &HeaderMap) -> bool {
    headers.get_first_header_value(&header::TRANSFER_ENCODING)
        .map(|v| v.contains("chunked")).unwrap_or(false)
}

impl Parse<Vec<u8>> for BodyParser {
    fn parse(self, reader: &mut impl BufRead) -> ParseResult<Vec<u8>, Self> {
        let mut reader = reader.error_take((MAX_BODY_SIZE - self.read_so_far()) as u64);

        Ok(match self {
            WithSize(parser) => parser.parse(&mut reader)?.map_blocked(WithSize),
            Empty => Done(vec![]),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use crate::header_map;
    use crate::parse::body::BodyParser;
    use crate::parse::error::ParsingError::{ContentLengthTooLarge, UnsupportedTransferEncoding};
    use crate::parse::test_util;
    use crate::parse::test_util::TestParseResult;
    use crate::parse::test_util::TestParseResult::{IoErr, Value};

    fn test_sized(size: usize, tests: Vec<(Vec<&[u8]>, TestParseResult<Vec<u8>>)>) {
        let parser = BodyParser::new(&header_map![("content-length", size.to_string())]).unwrap();
        test_util::test_blocking(parser, tests);
    }

    #[test]
    fn sized_body_all_at_once() {
        test_sized(11, vec![
            (vec![b"hello world"], Value(b"hello world".to_vec()))
        ])
    }

    #[test]
    fn stops_reading_once_size_is_reached() {
        test_sized(11, vec![
            (vec![b"hello worldhello world"], Value(b"hello world".to_vec())),
        ])
    }

    #[test]
    fn sized_body_all_at_once_fragmented() {
        test_sized(11, vec![
            (vec![b"h", b"el", b"lo", b" w", b"or", b"ld"], Value(b"hello world".to_vec()))
        ])
    }

    #[test]
    fn sized_body_partial() {
        test_sized(11, vec![
            (vec![], ErrorKind::WouldBlock.into()),
            (vec![b"h", b"ell"], ErrorKind::WouldBlock.into()),
            (vec![b"o"], ErrorKind::WouldBlock.into()),
            (vec![b" w", b"o", b"rl"], ErrorKind::WouldBlock.into()),
            (vec![b"d"], Value(b"hello world".to_vec())),
        ])
    }

    #[test]
    fn sized_body_eof_before_size_reached() {
        test_sized(11, vec![
            (vec![b"h", b"ell"], ErrorKind::WouldBlock.into()),
            (vec![b"o"], ErrorKind::WouldBlock.into()),
            (vec![b""], IoErr(Error::from(ErrorKind::UnexpectedEof))),
        ])
    }

    #[test]
    fn sized_body_too_big() {
        let res = BodyParser::new(&header_map![("content-length", usize::max_value().to_string())]);
        assert_eq!(format!("{:?}", res.err().unwrap()), format!("{:?}", ContentLengthTooLarge))
    }

    #[test]
    fn no_content_length_reads_nothing() {
        let parser = BodyParser::new(&header_map![]).unwrap();
        test_util::test_endless_bytes(parser, vec![], b"blah", Value(vec![]))
    }

    #[test]
    fn chunked_transfer_encoding_rejected() {
        let res = BodyParser::new(&header_map![("transfer-encoding", "chunked")]);
        assert_eq!(format!("{:?}", res.err().unwrap()), format!("{:?}", UnsupportedTransferEncoding))
    }

    #[test]
    fn zero_content_length_no_data() {
        test_sized(0, vec![
            (vec![], Value(vec![]))
        ])
    }

    #[test]
    fn zero_content_length_with_data() {
        test_sized(0, vec![
            (vec![b"h", b"ell"], Value(vec![]))
        ])
    }
}
