use std::io::Cursor;

use binrw::BinRead;

use crate::error::{MoError, Result};
use crate::shared_macros::read_u32_le;
use crate::types::ByteOrder;

pub const LE_MAGIC: u32 = 0x950412de;
pub const BE_MAGIC: u32 = 0xde120495;

/// Size of the fixed header: magic, revision, string count and four table
/// offset/size words.
pub const HEADER_SIZE: usize = 7 * 4;

#[derive(Debug, BinRead)]
struct MoHeaderRaw {
    magic: u32,
    revision: u32,
    num_strings: u32,
    orig_tab_offset: u32,
    trans_tab_offset: u32,
    hash_tab_size: u32,
    hash_tab_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoHeader {
    pub byte_order: ByteOrder,
    pub major_version: u32,
    pub minor_version: u32,
    pub num_strings: u32,
    pub orig_tab_offset: u32,
    pub trans_tab_offset: u32,
    pub hash_tab_size: u32,
    pub hash_tab_offset: u32,
}

impl MoHeader {
    /// Parse the fixed header at the start of `data`.
    ///
    /// Rejects short buffers, unknown magic numbers and major revisions
    /// other than 0 and 1.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(MoError::InvalidFormat(format!(
                "message catalog is too short ({} bytes)",
                data.len()
            )));
        }

        let byte_order = match read_u32_le!(data, 0) {
            LE_MAGIC => ByteOrder::Little,
            BE_MAGIC => ByteOrder::Big,
            other => return Err(MoError::WrongMagic(other)),
        };

        let mut cur = Cursor::new(&data[..HEADER_SIZE]);
        let raw = MoHeaderRaw::read_options(&mut cur, byte_order.endian(), ())?;
        debug_assert_eq!(raw.magic, LE_MAGIC);

        let major_version = raw.revision >> 16;
        let minor_version = raw.revision & 0xffff;
        if major_version > 1 {
            return Err(MoError::UnsupportedVersion {
                major: major_version,
                minor: minor_version,
            });
        }

        Ok(MoHeader {
            byte_order,
            major_version,
            minor_version,
            num_strings: raw.num_strings,
            orig_tab_offset: raw.orig_tab_offset,
            trans_tab_offset: raw.trans_tab_offset,
            hash_tab_size: raw.hash_tab_size,
            hash_tab_offset: raw.hash_tab_offset,
        })
    }

    pub fn has_hash_table(&self) -> bool {
        self.hash_tab_size > 2
    }
}
