//! Runtime lookup of translations in compiled gettext `.mo` catalogs.
//!
//! A [`TextDomain`] resolves locale names to catalog files, parses and
//! caches them, and layers them into a [`Catalog`] answering
//! `gettext`-family queries. Queries never fail: anything that cannot be
//! translated falls back to the message id.

uniffi::setup_scaffolding!();

mod shared_macros;

pub mod buffer_source;
pub mod catalog;
pub mod error;
pub mod ffi;
pub mod format;
pub mod locale;
pub mod mo_catalog;
pub mod plural;
pub mod text_domain;
pub mod types;

pub use buffer_source::BufferSource;
pub use catalog::Catalog;
pub use error::{MoError, Result};
pub use mo_catalog::MoCatalog;
pub use text_domain::{default_resolver, TextDomain};
