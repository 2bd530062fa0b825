// Generates `read_u32_le!` / `read_u32_be!` style macros that decode an integer
// at a byte offset of a buffer. Callers must have bounds-checked the range.
macro_rules! generate_read_int_macros {
    ($($type:ty);*) => {
        $(
            paste::item! {
                macro_rules! [< read_ $type _be >] {
                    ($buf:expr, $offset:expr) => {{
                        const SIZE: usize = std::mem::size_of::<$type>();
                        let mut raw = [0u8; SIZE];
                        raw.copy_from_slice(&$buf[$offset..$offset + SIZE]);
                        <$type>::from_be_bytes(raw)
                    }};
                }

                macro_rules! [< read_ $type _le >] {
                    ($buf:expr, $offset:expr) => {{
                        const SIZE: usize = std::mem::size_of::<$type>();
                        let mut raw = [0u8; SIZE];
                        raw.copy_from_slice(&$buf[$offset..$offset + SIZE]);
                        <$type>::from_le_bytes(raw)
                    }};
                }

                #[allow(unused_imports)]
                pub(crate) use [< read_ $type _be >];
                #[allow(unused_imports)]
                pub(crate) use [< read_ $type _le >];
            }
        )*
    };
}

generate_read_int_macros!(
    u32
);

// Reads a u32 in the catalog's byte order.
macro_rules! read_u32_ordered {
    ($order:expr, $buf:expr, $offset:expr) => {{
        match $order {
            $crate::types::ByteOrder::Little => $crate::shared_macros::read_u32_le!($buf, $offset),
            $crate::types::ByteOrder::Big => $crate::shared_macros::read_u32_be!($buf, $offset),
        }
    }};
}

pub(crate) use read_u32_ordered;
