//! Synchronous operation reader with iterator interface
//!
//! Provides a streaming iterator over operations read from a source of
//! whitespace-separated JSON objects. Delegates wire format concerns to the
//! json_format module.
//!
//! # Error Handling
//!
//! - Failing to open the source is returned from `open()`
//! - Decoding and read errors are yielded as Err variants in the iterator,
//!   tagged with the 1-based line number, and end the iteration

use crate::io::json_format::OperationDecoder;
use crate::io::{open_error, InputSource};
use crate::types::{AuthorizerError, Operation};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

/// Synchronous operation reader
///
/// # Examples
///
/// ```no_run
/// use rust_authorizer::io::{InputSource, SyncReader};
///
/// let reader = SyncReader::open(&InputSource::Stdin).unwrap();
/// for operation in reader {
///     println!("{:?}", operation);
/// }
/// ```
#[derive(Debug)]
pub struct SyncReader<R: BufRead> {
    lines: Lines<R>,
    decoder: OperationDecoder,
}

impl<R: BufRead> SyncReader<R> {
    /// Create a SyncReader over any buffered reader
    pub fn new(reader: R) -> Self {
        SyncReader {
            lines: reader.lines(),
            decoder: OperationDecoder::new(),
        }
    }

    /// Number of lines consumed so far, blank ones included
    pub fn line_num(&self) -> u64 {
        self.decoder.lines_fed()
    }
}

impl SyncReader<Box<dyn BufRead>> {
    /// Open an input source for reading
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, or `IoError` if it
    /// cannot be opened for another reason.
    pub fn open(source: &InputSource) -> Result<Self, AuthorizerError> {
        let reader: Box<dyn BufRead> = match source {
            InputSource::Stdin => Box::new(std::io::stdin().lock()),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|e| open_error(path, e))?;
                Box::new(BufReader::new(file))
            }
        };
        Ok(SyncReader::new(reader))
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<Operation, AuthorizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(operation) = self.decoder.next_operation() {
                return Some(operation);
            }
            if self.decoder.has_failed() {
                return None;
            }
            match self.lines.next() {
                Some(Ok(line)) => self.decoder.feed(&line),
                Some(Err(e)) => return Some(Err(AuthorizerError::from(e))),
                None => return self.decoder.finish(),
            }
        }
    }
}
