//! Asynchronous operation reader
//!
//! Provides the same decoding as the SyncReader over tokio I/O, for the
//! reader task of the async pipeline.
//!
//! # Architecture
//!
//! ```text
//! AsyncBufRead → AsyncReader → Operation
//!                    ↓
//!            json_format module
//!            (OperationDecoder)
//! ```

use crate::io::json_format::OperationDecoder;
use crate::io::{open_error, InputSource};
use crate::types::{AuthorizerError, Operation};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

/// Asynchronous operation reader
pub struct AsyncReader<R: AsyncBufRead + Unpin> {
    lines: Lines<R>,
    decoder: OperationDecoder,
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    /// Create a new AsyncReader from an async buffered reader
    pub fn new(reader: R) -> Self {
        AsyncReader {
            lines: reader.lines(),
            decoder: OperationDecoder::new(),
        }
    }

    /// Read and decode the next operation
    ///
    /// Objects may span lines and share them. Errors are tagged with the
    /// 1-based line number and end the stream.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Operation))` - Successfully decoded operation
    /// * `Some(Err(AuthorizerError))` - Read or decode error
    /// * `None` - End of input reached
    pub async fn next_operation(&mut self) -> Option<Result<Operation, AuthorizerError>> {
        loop {
            if let Some(operation) = self.decoder.next_operation() {
                return Some(operation);
            }
            if self.decoder.has_failed() {
                return None;
            }
            match self.lines.next_line().await {
                Ok(Some(line)) => self.decoder.feed(&line),
                Ok(None) => return self.decoder.finish(),
                Err(e) => return Some(Err(AuthorizerError::from(e))),
            }
        }
    }
}

impl AsyncReader<Box<dyn AsyncBufRead + Unpin + Send>> {
    /// Open an input source for async reading
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, or `IoError` if it
    /// cannot be opened for another reason.
    pub async fn open(source: &InputSource) -> Result<Self, AuthorizerError> {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = match source {
            InputSource::Stdin => Box::new(BufReader::new(tokio::io::stdin())),
            InputSource::File(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| open_error(path, e))?;
                Box::new(BufReader::new(file))
            }
        };
        Ok(AsyncReader::new(reader))
    }
}
