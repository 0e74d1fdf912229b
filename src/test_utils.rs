//! Helpers for building PFS0 archives in memory.

use std::sync::Arc;

use crate::io::MemoryReader;

/// One entry of a test archive.
pub struct TestEntry<'a> {
    pub name: &'a str,
    pub data_offset: i64,
    pub data_size: i64,
}

/// Lays out a PFS0 archive.
///
/// Names are packed into the string table in entry order, each followed by
/// a null byte, then padded to `string_table_size` when one is given.
pub struct ArchiveBuilder<'a> {
    magic: [u8; 4],
    entries: Vec<TestEntry<'a>>,
    string_table_size: Option<i32>,
}

impl Default for ArchiveBuilder<'_> {
    fn default() -> Self {
        Self {
            magic: *b"PFS0",
            entries: Vec::new(),
            string_table_size: None,
        }
    }
}

impl<'a> ArchiveBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn magic(mut self, magic: &[u8; 4]) -> Self {
        self.magic = *magic;
        self
    }

    pub fn entry(mut self, name: &'a str, data_offset: i64, data_size: i64) -> Self {
        self.entries.push(TestEntry {
            name,
            data_offset,
            data_size,
        });
        self
    }

    pub fn string_table_size(mut self, size: i32) -> Self {
        self.string_table_size = Some(size);
        self
    }

    /// Header, entry table and string table, without any data.
    pub fn metadata(&self) -> Vec<u8> {
        let mut names = Vec::new();
        let mut table = Vec::new();
        for entry in &self.entries {
            table.extend_from_slice(&entry.data_offset.to_le_bytes());
            table.extend_from_slice(&entry.data_size.to_le_bytes());
            table.extend_from_slice(&(names.len() as i32).to_le_bytes());
            table.extend_from_slice(&0u32.to_le_bytes());
            names.extend_from_slice(entry.name.as_bytes());
            names.push(0);
        }

        let table_size = self.string_table_size.unwrap_or(names.len() as i32);
        if table_size > 0 && names.len() < table_size as usize {
            names.resize(table_size as usize, 0);
        }

        let mut data = self.magic.to_vec();
        data.extend_from_slice(&(self.entries.len() as i32).to_le_bytes());
        data.extend_from_slice(&table_size.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&table);
        data.extend_from_slice(&names);
        data
    }

    /// Metadata followed by `data_len` bytes of data region.
    pub fn build(&self, data_len: usize) -> Vec<u8> {
        let mut data = self.metadata();
        data.extend((0..data_len).map(|i| i as u8));
        data
    }

    pub fn reader(&self, data_len: usize) -> Arc<MemoryReader> {
        Arc::new(MemoryReader::new(self.build(data_len)))
    }
}

/// Little-endian header bytes with arbitrary field values.
pub fn raw_header(magic: &[u8; 4], entry_count: i32, string_table_size: i32) -> Vec<u8> {
    let mut data = magic.to_vec();
    data.extend_from_slice(&entry_count.to_le_bytes());
    data.extend_from_slice(&string_table_size.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builder_is_an_empty_archive() {
        let data = ArchiveBuilder::default().metadata();
        assert_eq!(data, raw_header(b"PFS0", 0, 0));
        assert_eq!(data, ArchiveBuilder::new().metadata());
    }
}
