use std::io::Cursor;
use std::ops::Range;

use binrw::BinRead;

use crate::error::{MoError, Result};
use crate::shared_macros::read_u32_ordered;
use crate::types::ByteOrder;

/// Size in bytes of one `(length, offset)` table entry.
pub const DESCRIPTOR_SIZE: usize = 8;

/// Location of one string inside the catalog buffer. The length excludes
/// the trailing nul that `msgfmt` writes after every string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
pub struct StringDescriptor {
    pub length: u32,
    pub offset: u32,
}

impl StringDescriptor {
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.length as usize
    }
}

#[derive(Debug, BinRead)]
#[br(import(count: usize))]
struct StringTableRaw {
    #[br(count = count)]
    entries: Vec<StringDescriptor>,
}

/// Byte range of a table of `count` entries of `entry_size` bytes starting
/// at `offset`, if it lies inside a buffer of `buf_len` bytes.
pub fn table_range(offset: u32, count: u32, entry_size: usize, buf_len: usize) -> Option<Range<usize>> {
    let start = usize::try_from(offset).ok()?;
    let size = usize::try_from(count).ok()?.checked_mul(entry_size)?;
    let end = start.checked_add(size)?;
    (end <= buf_len).then_some(start..end)
}

/// Decode a string descriptor table and check that every string lies
/// inside `data`.
pub fn read_string_table(
    data: &[u8],
    order: ByteOrder,
    offset: u32,
    count: u32,
    name: &'static str,
) -> Result<Vec<StringDescriptor>> {
    let range = table_range(offset, count, DESCRIPTOR_SIZE, data.len())
        .ok_or_else(|| MoError::OutOfBounds(format!("{} table out of bounds", name)))?;

    let mut cur = Cursor::new(&data[range]);
    let raw = StringTableRaw::read_options(&mut cur, order.endian(), (count as usize,))?;

    for (i, entry) in raw.entries.iter().enumerate() {
        let end = u64::from(entry.offset) + u64::from(entry.length);
        if end > data.len() as u64 {
            return Err(MoError::OutOfBounds(format!(
                "{} string {} data (len={:#x}, offset={:#x}) is out of bounds",
                name, i, entry.length, entry.offset
            )));
        }
    }

    Ok(raw.entries)
}

/// Check that every hash slot is empty or a one-based index into the
/// string tables. The hash table is not used for lookups.
pub fn validate_hash_table(
    data: &[u8],
    order: ByteOrder,
    offset: u32,
    size: u32,
    num_strings: u32,
) -> Result<()> {
    let range = table_range(offset, size, 4, data.len())
        .ok_or_else(|| MoError::OutOfBounds("hash table out of bounds".to_string()))?;

    let table = &data[range];
    for slot in 0..size {
        let value = read_u32_ordered!(order, table, slot as usize * 4);
        if value > num_strings {
            return Err(MoError::CorruptHashTable { slot, value });
        }
    }
    Ok(())
}
