//! I/O module
//!
//! Handles JSON lines parsing and output.
//!
//! # Components
//!
//! - `json_format` - Wire format handling (operation conversion, state serialization)
//! - `sync_reader` - Synchronous operation reader with iterator interface
//! - `async_reader` - Asynchronous operation reader over tokio I/O

use crate::types::AuthorizerError;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod async_reader;
pub mod json_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use json_format::{
    convert_operation_input, parse_operation, write_state, OperationDecoder, OperationInput,
    StateOutput,
};
pub use sync_reader::SyncReader;

/// Where operations are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, read until end of stream
    Stdin,
    /// A JSON lines file
    File(PathBuf),
}

impl InputSource {
    /// Read from `path`, or from standard input when no path is given
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(InputSource::Stdin, InputSource::File)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Map a failure to open `path` to the matching fatal error
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> AuthorizerError {
    match error.kind() {
        std::io::ErrorKind::NotFound => AuthorizerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => AuthorizerError::from(error),
    }
}
