//! # pfsverify
//!
//! Verify that PFS0 (NSP) archives are complete.
//!
//! This library reads a PFS0 archive's header, entry table and file names,
//! then checks whether every declared file's byte range actually fits inside
//! the archive. Archives can be read from the local filesystem or from
//! HTTP servers; remote archives are checked with Range requests that fetch
//! only the metadata, never the file data.
//!
//! ## Features
//!
//! - Per-file status: complete, truncated or missing
//! - Whole-archive verdict: verified, has extra data or incomplete
//! - Local files and HTTP/HTTPS URLs behind one [`ReadAt`] trait
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use pfsverify::{LocalFileReader, PfsVerifier};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("game.nsp"))?);
//!     let report = PfsVerifier::new(reader).verify().await?;
//!
//!     for entry in &report.entries {
//!         println!("{}: {}", entry.name, entry.status);
//!     }
//!     println!("archive {}", report.outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod pfs;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cli::Cli;
pub use io::{HttpRangeReader, LocalFileReader, MemoryReader, ReadAt};
pub use pfs::{ArchiveOutcome, EntryStatus, PfsError, PfsVerifier, VerificationReport};
