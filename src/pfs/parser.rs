//! Low-level PFS0 archive parser.
//!
//! This module handles the binary parsing of PFS0 structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! PFS0 archives are read from the front:
//! 1. Read the 16-byte header at offset 0
//! 2. Read the whole entry table that follows it in one request
//! 3. Resolve each entry's name from the string table, one entry at a time
//!
//! Only these metadata regions are fetched. The data region is never read,
//! which keeps verification of remote archives cheap.

use std::sync::Arc;

use crate::io::{read_exact_at, ReadAt};

use super::error::{PfsError, Result};
use super::structures::*;

/// Bytes fetched per step while scanning for a name terminator.
const NAME_CHUNK_SIZE: usize = 256;

/// Low-level PFS0 parser.
///
/// Generic over the reader type to support local files, HTTP sources and
/// in-memory buffers alike.
///
/// ## Usage
///
/// Typically used through [`PfsVerifier`](super::PfsVerifier)
/// rather than directly.
///
/// ## Example
///
/// ```ignore
/// let parser = PfsParser::new(reader);
/// let header = parser.read_header().await?;
/// let layout = header.layout();
/// for entry in parser.read_entries(&header).await? {
///     let name = parser.resolve_name(&layout, &entry).await?;
/// }
/// ```
pub struct PfsParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> PfsParser<R> {
    /// Create a new parser for the given reader.
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Physical size of the archive, as reported by the reader.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read and decode the archive header.
    ///
    /// # Errors
    ///
    /// [`PfsError::Format`] if the source does not start with `PFS0`,
    /// [`PfsError::TruncatedHeader`] if it ends inside the header.
    pub async fn read_header(&self) -> Result<ArchiveHeader> {
        let mut buf = [0u8; ArchiveHeader::SIZE];
        let n = read_exact_at(self.reader.as_ref(), 0, &mut buf).await?;
        let header = ArchiveHeader::from_bytes(&buf[..n])?;

        tracing::debug!(
            entry_count = header.entry_count,
            string_table_size = header.string_table_size,
            "read PFS0 header"
        );

        Ok(header)
    }

    /// Read the entry table described by `header`, in on-disk order.
    ///
    /// A non-positive entry count yields an empty table.
    ///
    /// # Errors
    ///
    /// [`PfsError::TruncatedHeader`] if the archive ends before the last
    /// record.
    pub async fn read_entries(&self, header: &ArchiveHeader) -> Result<Vec<FileEntry>> {
        let count = header.effective_entry_count();
        if count == 0 {
            return Ok(Vec::new());
        }

        let layout = header.layout();

        // Check the table end before allocating for it: the count comes
        // straight from the file and may be absurd.
        if layout.string_table_offset > self.size {
            let complete = (self.size - layout.entry_table_offset.min(self.size))
                / FileEntry::SIZE as u64;
            return Err(PfsError::TruncatedHeader {
                what: "entry table",
                offset: layout.entry_table_offset + complete * FileEntry::SIZE as u64,
                size: self.size,
            });
        }

        let mut table = vec![0u8; count * FileEntry::SIZE];
        let n = read_exact_at(self.reader.as_ref(), layout.entry_table_offset, &mut table).await?;
        if n < table.len() {
            return Err(PfsError::TruncatedHeader {
                what: "entry table",
                offset: layout.entry_table_offset + (n / FileEntry::SIZE * FileEntry::SIZE) as u64,
                size: layout.entry_table_offset + n as u64,
            });
        }

        table
            .chunks_exact(FileEntry::SIZE)
            .map(FileEntry::from_bytes)
            .collect()
    }

    /// Resolve the null-terminated name of `entry` from the string table.
    ///
    /// Each call scans independently; names may overlap or appear in any
    /// order within the table.
    ///
    /// # Errors
    ///
    /// - [`PfsError::NameOutOfRange`] if the name offset lies outside the table
    /// - [`PfsError::TruncatedHeader`] if the archive ends before the terminator
    /// - [`PfsError::Encoding`] if the name is not valid UTF-8
    pub async fn resolve_name(&self, layout: &ArchiveLayout, entry: &FileEntry) -> Result<String> {
        let name_offset = u64::try_from(entry.name_offset)
            .ok()
            .filter(|&offset| offset < layout.string_table_size)
            .ok_or(PfsError::NameOutOfRange {
                name_offset: entry.name_offset,
                table_size: layout.string_table_size as i32,
            })?;

        let start = layout.string_table_offset + name_offset;
        let mut position = start;
        let mut name = Vec::new();
        let mut chunk = [0u8; NAME_CHUNK_SIZE];

        loop {
            if position >= self.size {
                return Err(PfsError::TruncatedHeader {
                    what: "file name",
                    offset: start,
                    size: self.size,
                });
            }

            let want = (self.size - position).min(NAME_CHUNK_SIZE as u64) as usize;
            let n = self.reader.read_at(position, &mut chunk[..want]).await?;
            if n == 0 {
                return Err(PfsError::TruncatedHeader {
                    what: "file name",
                    offset: start,
                    size: position,
                });
            }

            if let Some(end) = chunk[..n].iter().position(|&b| b == 0) {
                name.extend_from_slice(&chunk[..end]);
                break;
            }
            name.extend_from_slice(&chunk[..n]);
            position += n as u64;
        }

        String::from_utf8(name).map_err(|source| PfsError::Encoding {
            offset: start,
            source,
        })
    }
}
