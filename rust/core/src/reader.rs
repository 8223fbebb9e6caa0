// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical-line reader
//!
//! Joins physical lines ending in a `\` continuation marker into a single
//! logical line. The marker is stripped and no separator is inserted, so
//! `"v 1 2\"` followed by `"3"` becomes `"v 1 23"`.

use std::io::{BufRead, Read};

use crate::config::ScanConfig;
use crate::error::{Error, Result};

/// Trailing marker that glues a physical line to the next one.
pub const CONTINUATION: char = '\\';

/// Reads logical lines from a buffered byte stream.
pub struct LogicalLineReader<R> {
    inner: R,
    /// Current physical line, terminator removed
    physical: Vec<u8>,
    /// Physical lines consumed so far
    line_number: usize,
    at_eof: bool,
    max_line_length: Option<usize>,
}

impl<R: BufRead> LogicalLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &ScanConfig::default())
    }

    pub fn with_config(inner: R, config: &ScanConfig) -> Self {
        Self {
            inner,
            physical: Vec::with_capacity(config.line_capacity),
            line_number: 0,
            at_eof: false,
            max_line_length: config.max_line_length,
        }
    }

    /// True once the underlying stream has been exhausted. Never resets.
    #[inline]
    pub fn is_at_eof(&self) -> bool {
        self.at_eof
    }

    /// Number of physical lines consumed so far.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next logical line into `buffer`, trimmed of surrounding whitespace.
    ///
    /// Returns the 1-based physical line number the logical line started on.
    /// When the stream runs out while accumulating, whatever was buffered
    /// (possibly nothing) is left in `buffer` and [`is_at_eof`](Self::is_at_eof)
    /// turns true. On I/O failure the contents of `buffer` are unspecified.
    pub fn read_logical_line(&mut self, buffer: &mut String) -> Result<usize> {
        buffer.clear();
        let start_line = self.line_number + 1;

        while !self.at_eof {
            if !self.read_physical_line()? {
                self.at_eof = true;
                break;
            }

            let text = String::from_utf8_lossy(&self.physical);
            match text.strip_suffix(CONTINUATION) {
                Some(content) => buffer.push_str(content),
                None => {
                    buffer.push_str(&text);
                    break;
                }
            }
        }

        trim_in_place(buffer);
        Ok(start_line)
    }

    /// Load one physical line into `self.physical`. Returns false at end of stream.
    fn read_physical_line(&mut self) -> Result<bool> {
        self.physical.clear();

        // Room for the content plus "\r\n" so an over-long line is detected
        // without buffering all of it.
        let read = match self.max_line_length {
            Some(limit) => (&mut self.inner)
                .take((limit as u64).saturating_add(2))
                .read_until(b'\n', &mut self.physical)?,
            None => self.inner.read_until(b'\n', &mut self.physical)?,
        };
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;

        if self.physical.last() == Some(&b'\n') {
            self.physical.pop();
        }
        if self.physical.last() == Some(&b'\r') {
            self.physical.pop();
        }

        if let Some(limit) = self.max_line_length {
            if self.physical.len() > limit {
                return Err(Error::LineTooLong {
                    line: self.line_number,
                    limit,
                });
            }
        }

        Ok(true)
    }
}

/// Trim both ends of `buffer` without reallocating.
fn trim_in_place(buffer: &mut String) {
    let end = buffer.trim_end().len();
    buffer.truncate(end);
    let start = buffer.len() - buffer.trim_start().len();
    buffer.drain(..start);
}
