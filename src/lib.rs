//! Download secrets from Doppler and substitute `$NAME`, `${NAME}`,
//! `{{NAME}}` or `${{NAME}}` placeholders across a tree of files.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod secrets;
pub mod substitute;

pub use error::{Result, SubstituteError};
pub use pipeline::run_substitution;
