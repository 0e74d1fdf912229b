use thiserror::Error;

/// Result type alias using [`PfsError`].
pub type Result<T> = std::result::Result<T, PfsError>;

/// Errors that abort a verification run.
///
/// Per-entry completeness (missing or truncated data) is not an error; it
/// is reported through [`VerificationReport`](super::VerificationReport).
#[derive(Debug, Error)]
pub enum PfsError {
    /// The source is not a PFS0 container, or a field is unusable.
    ///
    /// Besides a wrong magic this covers a negative string table size,
    /// a negative entry data offset or size (even one that would still
    /// land inside the archive), and entry ranges that overflow.
    #[error("invalid PFS0 archive: {0}")]
    Format(String),

    /// The source ended inside a fixed-size structure or before a name terminator.
    #[error("archive ends at {size:#x} while reading {what} at {offset:#x}")]
    TruncatedHeader {
        what: &'static str,
        offset: u64,
        size: u64,
    },

    /// A file name in the string table is not valid UTF-8.
    #[error("file name at {offset:#x} is not valid UTF-8: {source}")]
    Encoding {
        offset: u64,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// An entry's name offset points outside the string table.
    #[error("name offset {name_offset} is outside the string table ({table_size} bytes)")]
    NameOutOfRange { name_offset: i32, table_size: i32 },

    /// Reading from the underlying source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
