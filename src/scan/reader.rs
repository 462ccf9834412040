// src/scan/reader.rs

//! Bounded line reader.
//!
//! Splits the input into chunks that end at a newline or after `max_line`
//! bytes, whichever comes first. A line longer than the limit is delivered
//! as several consecutive chunks.

use std::io::{self, BufRead};

/// Default chunk size: the payload of the historical 1024-byte line buffer
/// (one byte was reserved for the terminator).
pub const DEFAULT_MAX_LINE: usize = 1023;

#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    max_line: usize,
}

impl<R: BufRead> LineReader<R> {
    /// `max_line` is clamped to at least one byte.
    pub fn new(inner: R, max_line: usize) -> Self {
        Self {
            inner,
            max_line: max_line.max(1),
        }
    }

    pub fn max_line(&self) -> usize {
        self.max_line
    }

    /// Read the next chunk into `buf`, replacing its contents.
    ///
    /// Returns `Ok(false)` once the input is exhausted.
    pub fn next_line(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();

        while buf.len() < self.max_line {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = self.max_line - buf.len();
            let window = &available[..available.len().min(room)];
            let (used, complete) = match window.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (window.len(), false),
            };

            buf.extend_from_slice(&window[..used]);
            self.inner.consume(used);

            if complete {
                break;
            }
        }

        Ok(!buf.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(input: &[u8], max_line: usize) -> Vec<Vec<u8>> {
        let mut reader = LineReader::new(input, max_line);
        let mut buf = Vec::new();
        let mut out = Vec::new();
        while reader.next_line(&mut buf).unwrap() {
            out.push(buf.clone());
        }
        out
    }

    #[test]
    fn splits_on_newlines_and_keeps_them() {
        assert_eq!(
            chunks(b"one\ntwo\nthree", 64),
            vec![b"one\n".to_vec(), b"two\n".to_vec(), b"three".to_vec()]
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(chunks(b"", 64).is_empty());
    }

    #[test]
    fn blank_lines_are_chunks() {
        assert_eq!(chunks(b"\n\n", 64), vec![b"\n".to_vec(), b"\n".to_vec()]);
    }

    #[test]
    fn long_lines_are_split_at_the_limit() {
        assert_eq!(
            chunks(b"abcdefg\nhi\n", 3),
            vec![
                b"abc".to_vec(),
                b"def".to_vec(),
                b"g\n".to_vec(),
                b"hi\n".to_vec(),
            ]
        );
    }

    #[test]
    fn line_exactly_at_limit_leaves_newline_for_next_chunk() {
        assert_eq!(
            chunks(b"abc\n", 3),
            vec![b"abc".to_vec(), b"\n".to_vec()]
        );
    }

    #[test]
    fn zero_limit_is_clamped() {
        let reader = LineReader::new(&b""[..], 0);
        assert_eq!(reader.max_line(), 1);
    }

    #[test]
    fn works_across_small_internal_buffers() {
        let inner = std::io::BufReader::with_capacity(2, &b"hello\nworld\n"[..]);
        let mut reader = LineReader::new(inner, 64);
        let mut buf = Vec::new();
        assert!(reader.next_line(&mut buf).unwrap());
        assert_eq!(buf, b"hello\n");
        assert!(reader.next_line(&mut buf).unwrap());
        assert_eq!(buf, b"world\n");
        assert!(!reader.next_line(&mut buf).unwrap());
    }
}
