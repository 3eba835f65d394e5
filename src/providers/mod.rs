//! External generation providers.
//!
//! Currently a single backend: a D-ID-style talks API.

pub mod d_id;
mod error;

pub use error::{PollError, SubmitError};
