//! Line-anchored `---` stream splitting for multi-document YAML
//!
//! A multi-document YAML stream separates documents with a line consisting
//! of `---`. This module provides the two pieces the multi-document parser
//! is built from:
//!
//! - [`split_yaml_document`] - the pure split function. Given a buffer and
//!   a flag saying whether it is the final suffix of the stream, it either
//!   yields the next document chunk (with the number of bytes to consume),
//!   asks for more input, or signals end-of-stream. The boundary decision
//!   is ambiguity-aware: a `---` at the end of the available bytes cannot
//!   be resolved until either more bytes or end-of-stream is known.
//! - [`DocScanner`] - the incremental driver. It owns a growable working
//!   buffer (4 KiB initially, 1 MiB ceiling by default), compacts consumed
//!   bytes, and resumes the separator search where the previous attempt
//!   stopped so already-scanned bytes are never revisited. Each yielded
//!   chunk is a stable copy; the internal buffer is reused across
//!   documents.
//!
//! The separator must start at a line boundary, so the scanner searches for
//! the literal four-byte sequence `\n---`. A `---` on the very first line
//! of a stream is not a separator; it is YAML's own document-start marker
//! and is left in the chunk for the decoder.
//!
//! # Examples
//!
//! ```rust
//! use driftwood::split::DocScanner;
//!
//! let stream = b"a: 1\n---\nb: 2\n";
//! let mut scanner = DocScanner::new(&stream[..]);
//!
//! assert_eq!(scanner.next_document().unwrap().as_deref(), Some(&b"a: 1"[..]));
//! assert_eq!(scanner.next_document().unwrap().as_deref(), Some(&b"b: 2\n"[..]));
//! assert_eq!(scanner.next_document().unwrap(), None);
//! ```

use std::io::Read;
use thiserror::Error;

/// The line-anchored document separator.
const SEPARATOR: &[u8] = b"\n---";

/// Initial working buffer size for [`DocScanner`].
pub const DEFAULT_INITIAL_BUFFER: usize = 4 * 1024;

/// Default ceiling the working buffer may grow to. A single document larger
/// than this fails the scan with [`ScanError::DocumentTooLarge`].
pub const DEFAULT_MAX_BUFFER: usize = 1024 * 1024;

/// Failure modes of the incremental scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    /// One document did not fit in the working buffer at its ceiling.
    #[error("document exceeds the {max} byte buffer ceiling")]
    DocumentTooLarge {
        /// The configured ceiling in bytes.
        max: usize,
    },

    /// Reading from the underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of one split attempt over an input buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum SplitAction<'a> {
    /// A document boundary was resolved: consume `advance` bytes and take
    /// `token` as the next document chunk.
    Token {
        /// Bytes to consume from the front of the buffer, including the
        /// separator line and its trailing newline when present.
        advance: usize,
        /// The document chunk preceding the separator.
        token: &'a [u8],
    },
    /// Not enough input to resolve the next boundary; supply more bytes and
    /// retry.
    NeedMore,
    /// The input is empty and final; no further tokens.
    End,
}

/// Splits off the next document from a multi-document buffer.
///
/// `at_eof` declares that `data` is the final, complete suffix of the
/// stream. The rules, in order:
///
/// - empty input at EOF ends the stream;
/// - a complete separator (`\n---` followed by a newline) yields the bytes
///   before it, consuming through the separator line;
/// - a separator whose line is still open (nothing after the marker, or
///   trailing bytes with no newline yet) requests more input; at EOF the
///   open line terminates the stream and the bytes before the separator
///   are the last token;
/// - no separator at all yields the entire buffer as the last token at
///   EOF, and requests more input otherwise.
pub fn split_yaml_document(data: &[u8], at_eof: bool) -> SplitAction<'_> {
    scan_step(data, at_eof, 0).0
}

/// One split attempt with a resume hint.
///
/// `from` is the offset the separator search may start at because earlier
/// bytes are already known not to contain one. The second element of the
/// return value is the hint to pass next time when the action is
/// [`SplitAction::NeedMore`]: the position of an incomplete separator
/// candidate, or the first offset a new separator could still begin at.
fn scan_step(data: &[u8], at_eof: bool, from: usize) -> (SplitAction<'_>, usize) {
    if at_eof && data.is_empty() {
        return (SplitAction::End, 0);
    }
    if let Some(i) = find_separator(data, from) {
        let after = &data[i + SEPARATOR.len()..];
        if after.is_empty() {
            if at_eof {
                // Separator terminates the stream: everything before it is
                // the last token.
                return (
                    SplitAction::Token {
                        advance: data.len(),
                        token: &data[..i],
                    },
                    0,
                );
            }
            // The separator line may continue (e.g. "----" or "--- junk");
            // wait for the newline that proves it is genuine.
            return (SplitAction::NeedMore, i);
        }
        if let Some(j) = after.iter().position(|&b| b == b'\n') {
            return (
                SplitAction::Token {
                    advance: i + SEPARATOR.len() + j + 1,
                    token: &data[..i],
                },
                0,
            );
        }
        if at_eof {
            // End of input terminates the separator line just as a newline
            // would; the partial line after the marker is consumed with it.
            return (
                SplitAction::Token {
                    advance: data.len(),
                    token: &data[..i],
                },
                0,
            );
        }
        return (SplitAction::NeedMore, i);
    }
    if at_eof {
        // Final, non-terminated document.
        return (
            SplitAction::Token {
                advance: data.len(),
                token: data,
            },
            0,
        );
    }
    // A separator could still begin inside the last three bytes.
    (
        SplitAction::NeedMore,
        data.len().saturating_sub(SEPARATOR.len() - 1),
    )
}

fn find_separator(data: &[u8], from: usize) -> Option<usize> {
    let from = from.min(data.len());
    data[from..]
        .windows(SEPARATOR.len())
        .position(|window| window == SEPARATOR)
        .map(|pos| pos + from)
}

/// Incremental multi-document scanner over a byte stream.
///
/// Wraps any [`Read`] implementation and lazily yields one owned chunk per
/// document. The working buffer starts at [`DEFAULT_INITIAL_BUFFER`] bytes
/// and doubles on demand up to [`DEFAULT_MAX_BUFFER`]; a single document
/// that cannot fit fails with [`ScanError::DocumentTooLarge`]. Consumed
/// bytes are compacted out of the buffer between documents, and the
/// separator search resumes after the bytes already scanned, so the cost of
/// splitting is linear in the stream size regardless of how the reads are
/// chunked.
#[derive(Debug)]
pub struct DocScanner<R> {
    input: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    /// Resume hint for the separator search, relative to `start`.
    hint: usize,
    max_buffer: usize,
    eof: bool,
}

impl<R: Read> DocScanner<R> {
    /// Creates a scanner with the default buffer sizes.
    pub fn new(input: R) -> Self {
        Self::with_capacity(input, DEFAULT_INITIAL_BUFFER, DEFAULT_MAX_BUFFER)
    }

    /// Creates a scanner with explicit initial and maximum buffer sizes.
    ///
    /// `initial` is raised to the separator length if smaller; `max` is
    /// raised to `initial` if smaller.
    pub fn with_capacity(input: R, initial: usize, max: usize) -> Self {
        let initial = initial.max(SEPARATOR.len());
        Self {
            input,
            buf: vec![0; initial],
            start: 0,
            end: 0,
            hint: 0,
            max_buffer: max.max(initial),
            eof: false,
        }
    }

    /// Yields the next document chunk, or `None` at end of stream.
    ///
    /// The returned bytes are a private copy; the scanner's working buffer
    /// is reused for subsequent documents.
    pub fn next_document(&mut self) -> Result<Option<Vec<u8>>, ScanError> {
        loop {
            let window = &self.buf[self.start..self.end];
            let (action, resume) = scan_step(window, self.eof, self.hint);
            match action {
                SplitAction::Token { advance, token } => {
                    let token = token.to_vec();
                    self.start += advance;
                    self.hint = 0;
                    return Ok(Some(token));
                }
                SplitAction::End => return Ok(None),
                SplitAction::NeedMore => {
                    self.hint = resume;
                    self.fill()?;
                }
            }
        }
    }

    /// Refills the buffer, compacting consumed bytes and growing the
    /// allocation when the unconsumed window already fills it.
    fn fill(&mut self) -> Result<(), ScanError> {
        if self.eof {
            // scan_step never requests more once at_eof is set.
            return Ok(());
        }
        if self.start > 0 {
            // The hint is relative to `start`, so compaction preserves it.
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        if self.end == self.buf.len() {
            if self.buf.len() >= self.max_buffer {
                return Err(ScanError::DocumentTooLarge {
                    max: self.max_buffer,
                });
            }
            let grown = (self.buf.len() * 2).min(self.max_buffer);
            self.buf.resize(grown, 0);
        }
        let read = self.input.read(&mut self.buf[self.end..])?;
        if read == 0 {
            self.eof = true;
        } else {
            self.end += read;
        }
        Ok(())
    }
}

impl<R: Read> Iterator for DocScanner<R> {
    type Item = Result<Vec<u8>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_document().transpose()
    }
}
