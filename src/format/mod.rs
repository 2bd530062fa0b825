pub mod header;
pub mod metadata;
pub mod string_table;

pub use header::{MoHeader, BE_MAGIC, HEADER_SIZE, LE_MAGIC};
pub use metadata::Metadata;
pub use string_table::{read_string_table, validate_hash_table, StringDescriptor};
