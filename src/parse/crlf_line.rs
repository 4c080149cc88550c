use std::io::{BufRead, ErrorKind};

use crate::parse::deframe::deframe::Deframe;
use crate::parse::deframe::line::LineDeframer;
use crate::parse::error::ParsingError;
use crate::parse::error_take::ReadExt;
use crate::parse::parse::{Parse, ParseStatus};
use crate::parse::parse::ParseStatus::{Done, IoErr};

const MAX_LINE_SIZE: usize = 512;

/// Parses a CRLF terminated line.
pub struct CrlfLineParser(LineDeframer);

impl CrlfLineParser {
    /// Creates a new CRLF line parser.
    pub fn new() -> CrlfLineParser {
        CrlfLineParser(LineDeframer::new())
    }

    /// Returns how many bytes this parser has read so far.
    pub fn read_so_far(&self) -> usize {
        self.0.read_so_far()
    }
}

impl Parse<String> for CrlfLineParser {
    fn parse(self, reader: &mut impl BufRead) -> Result<ParseStatus<String, Self>, ParsingError> {
        let mut reader = reader.error_take((MAX_LINE_SIZE - self.0.read_so_far()) as u64);
        Ok(match self.0.parse(&mut reader)? {
            Done(line) => Done(parse_crlf_line(line)?),
            IoErr(_, err) if err.kind() == ErrorKind::InvalidData => Err(ParsingError::InvalidUtf8)?,
            IoErr(parser, err) => IoErr(Self(parser), err),
        })
    }
}

/// Parses the given line as a CRLF terminated line. Assumes the given string already ends with \n.
fn parse_crlf_line(mut line: String) -> Result<String, ParsingError> {
    if let Some('\r') = line.pop() {
        Ok(line)
    } else {
        Err(ParsingError::BadSyntax)
    }
}
