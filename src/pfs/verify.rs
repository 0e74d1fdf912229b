//! Completeness checks for entry data ranges.
//!
//! Every entry is placed at an absolute range inside the archive and
//! compared with the archive's physical size. The archive as a whole is
//! then judged by the furthest byte any entry claims.

use std::fmt;

use super::error::{PfsError, Result};
use super::structures::{ArchiveHeader, ArchiveLayout, FileEntry};

/// Whether an entry's declared data is physically present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Complete,
    /// Starts inside the archive but runs past its end
    Truncated,
    /// Starts past the end of the archive
    Missing,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "Complete"),
            Self::Truncated => write!(f, "Truncated"),
            Self::Missing => write!(f, "Missing"),
        }
    }
}

/// Verdict for the whole archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The archive ends exactly where the last entry ends
    Verified,
    /// Bytes follow the furthest entry
    ExtraData,
    /// At least one entry runs past the end of the archive
    Incomplete,
}

impl fmt::Display for ArchiveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::ExtraData => write!(f, "has extra data"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Absolute byte range of an entry's data, `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRange {
    pub start: u64,
    pub end: u64,
}

impl EntryRange {
    /// Place `entry` relative to the data region starting at `data_offset`.
    ///
    /// Negative offsets or sizes, and ranges that overflow, cannot describe
    /// a real file and are rejected.
    pub fn locate(data_offset: u64, entry: &FileEntry) -> Result<Self> {
        let relative = u64::try_from(entry.data_offset).map_err(|_| {
            PfsError::Format(format!("negative data offset {}", entry.data_offset))
        })?;
        let size = u64::try_from(entry.data_size)
            .map_err(|_| PfsError::Format(format!("negative data size {}", entry.data_size)))?;

        let start = data_offset
            .checked_add(relative)
            .ok_or_else(|| PfsError::Format("entry data offset overflows".to_string()))?;
        let end = start
            .checked_add(size)
            .ok_or_else(|| PfsError::Format("entry data size overflows".to_string()))?;

        Ok(Self { start, end })
    }

    pub fn classify(&self, total_size: u64) -> EntryStatus {
        if self.start > total_size {
            EntryStatus::Missing
        } else if self.end > total_size {
            EntryStatus::Truncated
        } else {
            EntryStatus::Complete
        }
    }
}

/// Compare the archive's size with the furthest entry end.
pub fn aggregate(tail: u64, total_size: u64) -> ArchiveOutcome {
    match total_size.cmp(&tail) {
        std::cmp::Ordering::Equal => ArchiveOutcome::Verified,
        std::cmp::Ordering::Greater => ArchiveOutcome::ExtraData,
        std::cmp::Ordering::Less => ArchiveOutcome::Incomplete,
    }
}

/// Classified entries plus the archive verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// One range and status per entry, in input order
    pub results: Vec<(EntryRange, EntryStatus)>,
    pub tail: u64,
    pub outcome: ArchiveOutcome,
}

/// Locate and classify every entry, then judge the archive.
///
/// Statuses come back in the order of `entries`; the outcome does not
/// depend on that order.
pub fn evaluate(data_offset: u64, entries: &[FileEntry], total_size: u64) -> Result<Evaluation> {
    let mut results = Vec::with_capacity(entries.len());
    // Entry ranges never start before the data region, so this only
    // matters for an archive without entries.
    let mut tail = data_offset;

    for entry in entries {
        let range = EntryRange::locate(data_offset, entry)?;
        let status = range.classify(total_size);
        tracing::debug!(start = range.start, end = range.end, %status, "classified entry");

        tail = tail.max(range.end);
        results.push((range, status));
    }

    Ok(Evaluation {
        results,
        tail,
        outcome: aggregate(tail, total_size),
    })
}

/// Per-entry line of a verification report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub start: u64,
    pub end: u64,
    pub status: EntryStatus,
}

/// Result of verifying one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub header: ArchiveHeader,
    pub layout: ArchiveLayout,
    /// Physical size of the archive
    pub total_size: u64,
    pub entries: Vec<EntryReport>,
    /// Furthest byte claimed by any entry, the data offset without entries
    pub tail: u64,
    pub outcome: ArchiveOutcome,
}

impl VerificationReport {
    pub fn is_verified(&self) -> bool {
        self.outcome == ArchiveOutcome::Verified
    }

    /// Entries whose data is not fully present.
    pub fn damaged_entries(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries
            .iter()
            .filter(|e| e.status != EntryStatus::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(data_offset: i64, data_size: i64) -> FileEntry {
        FileEntry {
            data_offset,
            data_size,
            name_offset: 0,
        }
    }

    #[test]
    fn classifies_against_total_size() {
        let range = EntryRange::locate(0x28, &entry(0, 100)).unwrap();
        assert_eq!(range, EntryRange { start: 0x28, end: 0x28 + 100 });

        assert_eq!(range.classify(0x28 + 100), EntryStatus::Complete);
        assert_eq!(range.classify(0x28 + 150), EntryStatus::Complete);
        assert_eq!(range.classify(0x28 + 50), EntryStatus::Truncated);
        assert_eq!(range.classify(0x28), EntryStatus::Truncated);
        assert_eq!(range.classify(0x27), EntryStatus::Missing);
    }

    #[test]
    fn entry_past_the_end_is_missing() {
        let range = EntryRange::locate(0x28, &entry(1000, 10)).unwrap();
        assert_eq!(range.classify(0x28 + 999), EntryStatus::Missing);
    }

    #[test]
    fn empty_entry_at_the_end_is_complete() {
        let range = EntryRange::locate(0x28, &entry(0, 0)).unwrap();
        assert_eq!(range.classify(0x28), EntryStatus::Complete);
    }

    #[test]
    fn rejects_negative_or_overflowing_ranges() {
        for bad in [entry(-1, 10), entry(0, -10), entry(i64::MAX, 0)] {
            let err = EntryRange::locate(u64::MAX - 5, &bad).unwrap_err();
            assert!(matches!(err, PfsError::Format(_)));
        }
        let range = EntryRange::locate(0, &entry(i64::MAX, i64::MAX)).unwrap();
        assert_eq!(range.end, i64::MAX as u64 * 2);
    }

    #[test]
    fn negative_offset_is_rejected_even_inside_the_archive() {
        // 48 - 8 would still point at the string table
        let err = evaluate(48, &[entry(-8, 8)], 48).unwrap_err();
        assert!(matches!(err, PfsError::Format(ref reason) if reason.contains("-8")));
    }

    #[test]
    fn aggregate_compares_with_tail() {
        assert_eq!(aggregate(100, 100), ArchiveOutcome::Verified);
        assert_eq!(aggregate(100, 101), ArchiveOutcome::ExtraData);
        assert_eq!(aggregate(100, 99), ArchiveOutcome::Incomplete);
        assert_eq!(aggregate(0, 0), ArchiveOutcome::Verified);
    }

    #[test]
    fn no_entries_verifies_only_at_data_offset() {
        let evaluation = evaluate(24, &[], 24).unwrap();
        assert!(evaluation.results.is_empty());
        assert_eq!(evaluation.tail, 24);
        assert_eq!(evaluation.outcome, ArchiveOutcome::Verified);
        assert_eq!(evaluate(24, &[], 25).unwrap().outcome, ArchiveOutcome::ExtraData);
        assert_eq!(evaluate(24, &[], 23).unwrap().outcome, ArchiveOutcome::Incomplete);
    }

    #[test]
    fn outcome_ignores_entry_order() {
        let entries = [entry(0, 10), entry(10, 30), entry(40, 5)];
        let data_offset = 0x40;

        for total in [0x40 + 45, 0x40 + 44, 0x40 + 60] {
            let forward = evaluate(data_offset, &entries, total).unwrap();
            let mut reversed = entries;
            reversed.reverse();
            let backward = evaluate(data_offset, &reversed, total).unwrap();
            let rotated = [entries[1], entries[2], entries[0]];
            let rotated = evaluate(data_offset, &rotated, total).unwrap();
            assert_eq!(forward.outcome, backward.outcome);
            assert_eq!(forward.outcome, rotated.outcome);
            assert_eq!(forward.tail, backward.tail);
        }
    }

    #[test]
    fn statuses_keep_input_order() {
        let entries = [entry(50, 10), entry(0, 10), entry(200, 1)];
        let evaluation = evaluate(0, &entries, 55).unwrap();
        let statuses: Vec<_> = evaluation.results.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            [
                EntryStatus::Truncated,
                EntryStatus::Complete,
                EntryStatus::Missing
            ]
        );
        assert_eq!(evaluation.outcome, ArchiveOutcome::Incomplete);
        assert_eq!(evaluation.tail, 201);
    }
}
