use std::cell::RefCell;
use std::cmp::min;
use std::io::{BufRead, Error, ErrorKind, Read, Write};
use std::ops::DerefMut;
use std::rc::Rc;

pub struct MockReader {
    pub return_would_block_when_empty: bool,
    pub data: Vec<Vec<u8>>,
}

impl MockReader {
    pub fn from_strs(data: Vec<&str>) -> MockReader {
        MockReader { data: data.into_iter().map(|s| s.as_bytes().to_vec()).collect(), return_would_block_when_empty: false }
    }

    pub fn from_bytes(data: Vec<&[u8]>) -> MockReader {
        MockReader { data: data.into_iter().map(|s| s.to_vec()).collect(), return_would_block_when_empty: false }
    }
}

impl Read for MockReader {
    fn read(&mut self, mut buf: &mut [u8]) -> std::io::Result<usize> {
        if self.data.is_empty() {
            return if !self.return_would_block_when_empty {
                Ok(0)
            } else {
                Err(Error::from(ErrorKind::WouldBlock))
            };
        }

        let next = self.data.first_mut().unwrap();

        let amount = min(buf.len(), next.len());
        let to_read: Vec<u8> = next.drain(0..amount).collect();
        buf.write(&to_read).unwrap();

        if next.is_empty() {
            self.data.remove(0);
        }

        Ok(amount)
    }
}

pub struct EndlessMockReader {
    finite_reader: MockReader,
    sequence: Vec<u8>,
    current: usize,
}

impl EndlessMockReader {
    pub fn from_strs(finite_data: Vec<&str>, sequence: &str) -> EndlessMockReader {
        EndlessMockReader { finite_reader: MockReader::from_strs(finite_data), sequence: sequence.as_bytes().to_vec(), current: 0 }
    }

    pub fn from_bytes(finite_data: Vec<&[u8]>, sequence: &[u8]) -> EndlessMockReader {
        EndlessMockReader { finite_reader: MockReader::from_bytes(finite_data), sequence: sequence.to_vec(), current: 0 }
    }
}

impl Read for EndlessMockReader {
    fn read(&mut self, mut buf: &mut [u8]) -> std::io::Result<usize> {
        let size = self.finite_reader.read(buf)?;
        if size > 0 {
            Ok(size)
        } else {
            let start = self.current;
            let range = min(self.sequence.len() - start, buf.len());
            buf.write_all(&self.sequence[start..(start + range)])?;
            self.current = (start + range) % self.sequence.len();
            Ok(range)
        }
    }
}

pub struct MockWriter {
    pub written: Rc<RefCell<Vec<Vec<u8>>>>,
    pub flushed: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl MockWriter {
    pub fn new() -> MockWriter {
        MockWriter { written: Rc::new(RefCell::new(vec![])), flushed: Rc::new(RefCell::new(vec![])) }
    }
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.borrow_mut().push(Vec::from(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed.borrow_mut().append(self.written.borrow_mut().deref_mut());
        Ok(())
    }
}

pub struct MockStream<R, W> {
    pub reader: R,
    pub writer: W,
}

impl<R, W> MockStream<R, W> {
    pub fn new(reader: R, writer: W) -> MockStream<R, W> {
        MockStream { reader, writer }
    }
}

impl<R: Read, W> Read for MockStream<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R: BufRead, W> BufRead for MockStream<R, W> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl<R, W: Write> Write for MockStream<R, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
