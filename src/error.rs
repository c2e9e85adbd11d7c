//! Error types for the fallible edges of the crate.
//!
//! Menu state transitions themselves never fail; errors only come from the
//! terminal and from validating user-supplied options.

use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("hover delay must be at most {max:?}, got {got:?}")]
    HoverDelayTooLong { got: Duration, max: Duration },
    #[error("panel transition must be at most {max:?}, got {got:?}")]
    TransitionTooLong { got: Duration, max: Duration },
}
