//! The `wordpipe` command: decode a byte stream into 32-bit words.
//!
//! The binary is a thin shell over [`execute`]; [`run`] holds the loop and is
//! generic over its input and output so it can be driven in memory.

pub mod cli;
pub mod logging;
mod run;

pub use cli::{Args, Format, LogFormat, SummaryFormat};
pub use run::{Report, execute, run};
