use std::io::{ErrorKind, Result, Write};

use crate::util::stream::InnerMut;

/// A buffered writer that handles WouldBlock errors.
/// WouldBlock errors simply stop execution of either a flush or a write, and remaining unwritten
/// data is stored in a buffer.
pub struct NonBlockingBufWriter<T> {
    buf: Vec<u8>,
    pos: usize,
    inner: T,
}

impl<T: Write> NonBlockingBufWriter<T> {
    /// Creates a new writer with a buffer that has the given capacity.
    pub fn with_capacity(capacity: usize, inner: T) -> NonBlockingBufWriter<T> {
        NonBlockingBufWriter { pos: 0, buf: Vec::with_capacity(capacity), inner }
    }

    /// Writes the contents of the buffer to the underlying writer.
    /// May only partially flush if the underlying writer blocks.
    fn flush_buf(&mut self) -> Result<()> {
        let amount = write_until_blocked(&mut self.inner, &self.buf[self.pos..])?;

        self.pos += amount;

        if self.pos >= self.buf.len() {
            self.pos = 0;
            self.buf.clear();
        }

        Ok(())
    }

    /// Flushes the underlying writer. If the underlying writer blocks when flushed, then Ok is
    /// still returned.
    fn flush_inner(&mut self) -> Result<()> {
        match self.inner.flush() {
            Err(error) if error.kind() == ErrorKind::WouldBlock => Ok(()),
            x => x,
        }
    }
}

impl<T: Write> Write for NonBlockingBufWriter<T> {
    fn write(&mut self, mut buf: &[u8]) -> Result<usize> {
        let len = buf.len();
        // try to avoid allocating more memory for buffer by flushing and then writing large data directly into underlying writer.
        if self.buf.len() + buf.len() > self.buf.capacity() {
            self.flush_buf()?;
            if self.pos == 0 && buf.len() > self.buf.capacity() { // if we flushed the writer but theres still not enough room
                let amount = write_until_blocked(&mut self.inner, buf)?;
                buf = &buf[amount..];
            }
        }
        self.buf.write(buf)?;
        Ok(len)
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_buf()?;
        self.flush_inner()
    }
}

/// Writes the given data to the given writer until completion or until the writer blocks.
fn write_until_blocked<W: Write>(writer: &mut W, buf: &[u8]) -> Result<usize> {
    let mut pos = 0;
    while pos != buf.len() {
        match writer.write(&buf[pos..]) {
            Ok(amount) => pos += amount,
            Err(error) if error.kind() == ErrorKind::WouldBlock => return Ok(pos),
            Err(error) => return Err(error),
        }
    }
    Ok(pos)
}

impl<W> InnerMut for NonBlockingBufWriter<W> {
    type Inner = W;

    fn inner_mut(&mut self) -> &mut Self::Inner {
        &mut self.inner
    }
}
