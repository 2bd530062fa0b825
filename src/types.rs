/// Byte order of a binary catalog, detected from its magic number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn endian(&self) -> binrw::Endian {
        match self {
            ByteOrder::Little => binrw::Endian::Little,
            ByteOrder::Big => binrw::Endian::Big,
        }
    }
}

/// Summary of a parsed catalog, for diagnostics and the FFI surface.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct CatalogInfo {
    pub byte_order: ByteOrder,
    pub major_version: u32,
    pub minor_version: u32,
    pub num_strings: u32,
    pub charset: Option<String>,
    pub plural_forms: Option<String>,
    pub nplurals: Option<u32>,
    pub is_mapped: bool,
}
