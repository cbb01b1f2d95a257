use std::io;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by coda.
///
/// Layout and drawing are total functions over well-typed input and never
/// produce errors; everything here comes from the boundary with the terminal.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Writing a frame to the output stream failed.
    #[error("render: {0}")]
    Render(String),
    /// Terminal control (raw mode, size query) failed.
    #[error("terminal: {0}")]
    Terminal(String),
    /// A geometry invariant was violated.
    #[error("geometry: {0}")]
    Geometry(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Render(e.to_string())
    }
}
