// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line classifier and tokenizer
//!
//! Turns each logical line into a [`ScanRecord`]: end of stream, blank,
//! comment, or a command with positional string parameters. Tokens are
//! kept as byte spans into the scanner's own line buffer, so records
//! borrow from the scanner and no per-token allocation happens.

use std::io::BufRead;

use nom::{
    bytes::complete::{take_while, take_while1},
    multi::fold_many0,
    sequence::preceded,
    IResult, Offset,
};
use smallvec::SmallVec;

use crate::config::ScanConfig;
use crate::decode::{decode_coord_reference, decode_float, CoordReference};
use crate::error::{Error, Result};
use crate::reader::LogicalLineReader;

/// Marker that starts a comment line.
pub const COMMENT: char = '#';

/// Byte range of a token within the logical line.
type Span = (usize, usize);

/// Token spans for one line; typical OBJ statements fit inline.
type Spans = SmallVec<[Span; 8]>;

/// Classified logical line
#[derive(Debug, Clone, PartialEq)]
pub enum ScanRecord<'a> {
    /// Stream exhausted with nothing buffered
    EndOfStream,
    /// No comment and no tokens
    Blank,
    /// Comment body, marker stripped and trimmed
    Comment(&'a str),
    /// Command name plus ordered parameters
    Command(CommandLine<'a>),
}

impl<'a> ScanRecord<'a> {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ScanRecord::EndOfStream)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ScanRecord::Blank)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, ScanRecord::Comment(_))
    }

    pub fn is_command(&self, name: &str) -> bool {
        matches!(self, ScanRecord::Command(command) if command.name() == name)
    }

    pub fn comment(&self) -> Option<&'a str> {
        match self {
            ScanRecord::Comment(body) => Some(*body),
            _ => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandLine<'a>> {
        match self {
            ScanRecord::Command(command) => Some(command),
            _ => None,
        }
    }
}

/// A command statement: name followed by whitespace-separated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine<'a> {
    line: usize,
    name: &'a str,
    params: SmallVec<[&'a str; 8]>,
}

impl<'a> CommandLine<'a> {
    /// Physical line the statement started on.
    pub fn line_number(&self) -> usize {
        self.line
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn params(&self) -> &[&'a str] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn string_param(&self, index: usize) -> Result<&'a str> {
        self.params
            .get(index)
            .copied()
            .ok_or_else(|| Error::ParameterOutOfRange {
                line: self.line,
                index,
                count: self.params.len(),
            })
    }

    pub fn float_param(&self, index: usize) -> Result<f32> {
        decode_float(self.string_param(index)?, self.line, index)
    }

    pub fn coord_reference_param(&self, index: usize) -> Result<CoordReference> {
        decode_coord_reference(self.string_param(index)?, self.line, index)
    }
}

/// Classify a single logical line without a stream.
///
/// `line_number` is only used for error reporting by the returned record.
pub fn classify(line: &str, line_number: usize) -> ScanRecord<'_> {
    let line = line.trim();
    let mut spans = Spans::new();
    match classify_into(line, &mut spans) {
        LineKind::Comment(start, end) => ScanRecord::Comment(&line[start..end]),
        LineKind::Command => command_from_spans(line, &spans, line_number),
        LineKind::Blank | LineKind::EndOfStream | LineKind::Pending => ScanRecord::Blank,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    /// Nothing classified yet, or the last read failed
    Pending,
    EndOfStream,
    Blank,
    Comment(usize, usize),
    Command,
}

/// Classify a trimmed line, leaving token spans in `spans` for commands.
fn classify_into(line: &str, spans: &mut Spans) -> LineKind {
    spans.clear();

    if let Some(rest) = line.strip_prefix(COMMENT) {
        let body = rest.trim();
        let start = line.offset(body);
        return LineKind::Comment(start, start + body.len());
    }

    tokenize(line, spans);
    if spans.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Command
    }
}

fn command_from_spans<'a>(line: &'a str, spans: &[Span], line_number: usize) -> ScanRecord<'a> {
    let mut tokens = spans.iter().map(|&(start, end)| &line[start..end]);
    match tokens.next() {
        Some(name) => ScanRecord::Command(CommandLine {
            line: line_number,
            name,
            params: tokens.collect(),
        }),
        None => ScanRecord::Blank,
    }
}

/// Token delimiter: space, tab, line feed, form feed, carriage return
#[inline]
fn is_delimiter(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn ws(input: &str) -> IResult<&str, &str> {
    take_while(is_delimiter)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_delimiter(c))(input)
}

/// Split on runs of whitespace, recording each token's span.
fn tokenize(line: &str, spans: &mut Spans) {
    let parsed: IResult<&str, ()> = fold_many0(
        preceded(ws, word),
        || (),
        |(), token: &str| {
            let start = line.offset(token);
            spans.push((start, start + token.len()));
        },
    )(line);
    // fold_many0 over complete input stops at the first recoverable error,
    // which is just the end of the tokens
    debug_assert!(parsed.is_ok());
}

/// Streaming line scanner
///
/// Owns the logical-line buffer and the classification of the most
/// recent line. Every [`parse_next_line`](Self::parse_next_line) call
/// resets both. Not meant to be reused after an I/O error.
///
/// ```rust,ignore
/// let mut lines = LineScanner::new(reader);
/// loop {
///     match lines.parse_next_line()? {
///         ScanRecord::EndOfStream => break,
///         ScanRecord::Command(cmd) if cmd.name() == "v" => { /* ... */ }
///         _ => {}
///     }
///     if lines.is_end_of_stream() {
///         break;
///     }
/// }
/// ```
pub struct LineScanner<R> {
    reader: LogicalLineReader<R>,
    buffer: String,
    spans: Spans,
    kind: LineKind,
    line: usize,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &ScanConfig::default())
    }

    pub fn with_config(reader: R, config: &ScanConfig) -> Self {
        Self {
            reader: LogicalLineReader::with_config(reader, config),
            buffer: String::with_capacity(config.line_capacity),
            spans: Spans::new(),
            kind: LineKind::Pending,
            line: 0,
        }
    }

    /// Read and classify the next logical line.
    ///
    /// Once the stream is exhausted, content left over from a trailing
    /// continuation is still returned as a record, with
    /// [`is_end_of_stream`](Self::is_end_of_stream) already true. Every call
    /// after that returns [`ScanRecord::EndOfStream`].
    pub fn parse_next_line(&mut self) -> Result<ScanRecord<'_>> {
        self.spans.clear();
        self.kind = LineKind::Pending;

        self.line = self.reader.read_logical_line(&mut self.buffer)?;

        self.kind = if self.reader.is_at_eof() && self.buffer.is_empty() {
            LineKind::EndOfStream
        } else {
            classify_into(&self.buffer, &mut self.spans)
        };
        Ok(self.current())
    }

    /// The most recently classified record; `None` before the first
    /// successful [`parse_next_line`](Self::parse_next_line).
    pub fn record(&self) -> Option<ScanRecord<'_>> {
        (self.kind != LineKind::Pending).then(|| self.current())
    }

    fn current(&self) -> ScanRecord<'_> {
        match self.kind {
            LineKind::EndOfStream => ScanRecord::EndOfStream,
            LineKind::Blank | LineKind::Pending => ScanRecord::Blank,
            LineKind::Comment(start, end) => ScanRecord::Comment(&self.buffer[start..end]),
            LineKind::Command => command_from_spans(&self.buffer, &self.spans, self.line),
        }
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.reader.is_at_eof()
    }

    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, LineKind::Comment(..))
    }

    pub fn is_command(&self, name: &str) -> bool {
        self.command_name() == Some(name)
    }

    pub fn command_name(&self) -> Option<&str> {
        match self.kind {
            LineKind::Command => self.token(0),
            _ => None,
        }
    }

    /// Comment body of the current line, if it is a comment.
    pub fn comment(&self) -> Option<&str> {
        match self.kind {
            LineKind::Comment(start, end) => Some(&self.buffer[start..end]),
            _ => None,
        }
    }

    /// Number of parameters after the command name; zero for non-commands.
    pub fn param_count(&self) -> usize {
        self.spans.len().saturating_sub(1)
    }

    pub fn string_param(&self, index: usize) -> Result<&str> {
        if self.kind != LineKind::Command {
            return Err(Error::NotACommand { line: self.line });
        }
        self.token(index + 1)
            .ok_or_else(|| Error::ParameterOutOfRange {
                line: self.line,
                index,
                count: self.param_count(),
            })
    }

    pub fn float_param(&self, index: usize) -> Result<f32> {
        decode_float(self.string_param(index)?, self.line, index)
    }

    pub fn coord_reference_param(&self, index: usize) -> Result<CoordReference> {
        decode_coord_reference(self.string_param(index)?, self.line, index)
    }

    /// Physical line the current logical line started on.
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn token(&self, position: usize) -> Option<&str> {
        self.spans
            .get(position)
            .map(|&(start, end)| &self.buffer[start..end])
    }
}
