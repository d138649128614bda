use std::io;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Everything that can go wrong while reading, querying, mutating or
/// writing a configuration.
///
/// Variants carry the identifying names/values as structured fields so
/// callers can branch on the kind instead of matching message strings.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested section does not exist. During a read this is also
    /// the structural error for an option line seen before any `[section]`
    /// header (the section name is empty in that case).
    #[error("No section: {0}")]
    NoSection(String),

    #[error("No option {option} in section {section}")]
    NoOption { section: String, option: String },

    #[error("Section {0:?} already exists")]
    SectionExists(String),

    #[error("invalid integer value {value:?}")]
    InvalidInt {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid float value {value:?}")]
    InvalidFloat {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("No boolean: {value} (option {option} in section {section})")]
    NotBoolean {
        section: String,
        option: String,
        value: String,
    },

    /// The underlying stream failed; distinct from any structural error.
    #[error("failed to read or write configuration data")]
    Io(#[from] io::Error),
}
