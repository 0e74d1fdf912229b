use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::error::{PfsError, Result};

/// PFS0 header - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub entry_count: i32,
    pub string_table_size: i32,
}

impl ArchiveHeader {
    pub const MAGIC: &'static [u8] = b"PFS0";
    pub const SIZE: usize = 16;

    /// Decode the header from the first bytes of the archive.
    ///
    /// `data` holds whatever could be read from offset 0, at most
    /// [`Self::SIZE`] bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MAGIC.len() || &data[0..4] != Self::MAGIC {
            return Err(PfsError::Format("missing PFS0 magic".to_string()));
        }

        if data.len() < Self::SIZE {
            return Err(PfsError::TruncatedHeader {
                what: "archive header",
                offset: 0,
                size: data.len() as u64,
            });
        }

        let mut cursor = Cursor::new(&data[4..Self::SIZE]);
        let entry_count = cursor.read_i32::<LittleEndian>()?;
        let string_table_size = cursor.read_i32::<LittleEndian>()?;
        let _reserved = cursor.read_u32::<LittleEndian>()?;

        if string_table_size < 0 {
            return Err(PfsError::Format(format!(
                "negative string table size {string_table_size}"
            )));
        }

        Ok(Self {
            entry_count,
            string_table_size,
        })
    }

    /// Number of entry records to read; a non-positive count means none.
    pub fn effective_entry_count(&self) -> usize {
        self.entry_count.max(0) as usize
    }

    pub fn layout(&self) -> ArchiveLayout {
        ArchiveLayout::from_header(self)
    }
}

/// PFS0 file entry record - 24 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    /// Offset of the content relative to the start of the data region
    pub data_offset: i64,
    pub data_size: i64,
    /// Offset of the name relative to the start of the string table
    pub name_offset: i32,
}

impl FileEntry {
    pub const SIZE: usize = 24;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);

        let data_offset = cursor.read_i64::<LittleEndian>()?;
        let data_size = cursor.read_i64::<LittleEndian>()?;
        let name_offset = cursor.read_i32::<LittleEndian>()?;
        let _reserved = cursor.read_u32::<LittleEndian>()?;

        Ok(Self {
            data_offset,
            data_size,
            name_offset,
        })
    }
}

/// Absolute positions derived from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Start of the entry table (always right after the header)
    pub entry_table_offset: u64,
    pub string_table_offset: u64,
    pub string_table_size: u64,
    /// Start of the data region; entry data offsets are relative to it
    pub data_offset: u64,
}

impl ArchiveLayout {
    pub fn from_header(header: &ArchiveHeader) -> Self {
        let entry_table_offset = ArchiveHeader::SIZE as u64;
        let string_table_offset =
            entry_table_offset + FileEntry::SIZE as u64 * header.effective_entry_count() as u64;
        let string_table_size = header.string_table_size.max(0) as u64;

        Self {
            entry_table_offset,
            string_table_offset,
            string_table_size,
            data_offset: string_table_offset + string_table_size,
        }
    }
}
