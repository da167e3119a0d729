use std::io::{BufRead, ErrorKind, Result};

/// Wraps a `BufRead` so that callers can look ahead by a single byte and pull whole lines
/// straight out of the reader's internal buffer.
pub struct ByteReader<R> {
    reader: R,
}

impl<R: BufRead> ByteReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the next byte without consuming it, or `None` at EOF.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(available) => return Ok(available.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Calls `f` on every slice of input up to (but not including) `delim`, then consumes
    /// the delimiter. Returns the number of bytes consumed, delimiter included; 0 means EOF.
    // modified from https://doc.rust-lang.org/src/std/io/mod.rs.html#1910-1936
    pub fn apply_on_slice_until_byte<F>(&mut self, delim: u8, mut f: F) -> Result<usize>
    where
        F: FnMut(&[u8]),
    {
        let mut read = 0;
        loop {
            let (done, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(n) => n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };

                match memchr::memchr(delim, available) {
                    Some(i) => {
                        f(&available[..i]);
                        (true, i + 1)
                    }
                    None => {
                        f(available);
                        (false, available.len())
                    }
                }
            };

            self.reader.consume(used);
            read += used;

            if done || used == 0 {
                return Ok(read);
            }
        }
    }

    /// Appends the next line to `buf` with its `\n` or `\r\n` terminator removed.
    /// Returns the number of bytes consumed from the stream, 0 at EOF.
    pub fn read_line_trim_newline(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        let start = buf.len();
        let n = self.apply_on_slice_until_byte(b'\n', |x| buf.extend_from_slice(x))?;

        if buf.len() > start && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(n)
    }
}
