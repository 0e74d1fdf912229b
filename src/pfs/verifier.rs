use std::sync::Arc;

use crate::io::ReadAt;

use super::error::Result;
use super::parser::PfsParser;
use super::structures::{ArchiveHeader, FileEntry};
use super::verify::{evaluate, EntryReport, VerificationReport};

/// An entry together with its resolved name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntry {
    pub name: String,
    pub entry: FileEntry,
}

/// PFS0 archive verifier
///
/// Owns the byte source for the duration of a run; dropping the verifier
/// releases it.
pub struct PfsVerifier<R: ReadAt> {
    parser: PfsParser<R>,
}

impl<R: ReadAt> PfsVerifier<R> {
    pub fn new(reader: Arc<R>) -> Self {
        Self {
            parser: PfsParser::new(reader),
        }
    }

    /// Read the archive header
    pub async fn read_header(&self) -> Result<ArchiveHeader> {
        self.parser.read_header().await
    }

    /// List all entries with their names, in table order
    pub async fn list_files(&self) -> Result<Vec<NamedEntry>> {
        let header = self.parser.read_header().await?;
        self.named_entries(&header).await
    }

    /// Check every entry's data range against the archive size
    pub async fn verify(&self) -> Result<VerificationReport> {
        let header = self.parser.read_header().await?;
        let layout = header.layout();
        let total_size = self.parser.size();

        tracing::debug!(
            total_size,
            string_table_offset = layout.string_table_offset,
            data_offset = layout.data_offset,
            "verifying archive"
        );

        let named = self.named_entries(&header).await?;
        let entries: Vec<FileEntry> = named.iter().map(|n| n.entry).collect();
        let evaluation = evaluate(layout.data_offset, &entries, total_size)?;

        let entries = named
            .into_iter()
            .zip(evaluation.results)
            .map(|(named, (range, status))| EntryReport {
                name: named.name,
                start: range.start,
                end: range.end,
                status,
            })
            .collect();

        Ok(VerificationReport {
            header,
            layout,
            total_size,
            entries,
            tail: evaluation.tail,
            outcome: evaluation.outcome,
        })
    }

    async fn named_entries(&self, header: &ArchiveHeader) -> Result<Vec<NamedEntry>> {
        let layout = header.layout();
        let entries = self.parser.read_entries(header).await?;

        let mut named = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = self.parser.resolve_name(&layout, &entry).await?;
            named.push(NamedEntry { name, entry });
        }
        Ok(named)
    }
}
