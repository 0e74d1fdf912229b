//! PFS0 archive parsing and verification.
//!
//! This module reads the metadata of PFS0 containers (the format used by
//! NSP packages) and checks that every file the archive declares is
//! physically present.
//!
//! ## Architecture
//!
//! - [`structures`]: header, entry record and derived layout
//! - [`parser`]: reads those structures and resolves names from a [`ReadAt`](crate::io::ReadAt) source
//! - [`verify`]: classifies entry ranges and judges the archive
//! - [`verifier`]: high-level API composing the above
//!
//! ## PFS0 Format Overview
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0x00 | 4 | magic `PFS0` |
//! | 0x04 | 4 | entry count |
//! | 0x08 | 4 | string table size |
//! | 0x0C | 4 | reserved |
//! | 0x10 | 24 × count | entry table |
//! | string table offset | string table size | null-terminated names |
//! | data offset | rest | file data |
//!
//! All integers are little-endian. Entry data offsets are relative to the
//! data region, name offsets to the string table.
//!
//! ## Limitations
//!
//! - No extraction, decryption or checksum validation
//! - Nested containers (NCA, HFS0) are not inspected

mod error;
mod parser;
mod structures;
mod verifier;
mod verify;

pub use error::{PfsError, Result};
pub use parser::PfsParser;
pub use structures::*;
pub use verifier::{NamedEntry, PfsVerifier};
pub use verify::*;
