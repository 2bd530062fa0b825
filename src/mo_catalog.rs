use std::borrow::Cow;
use std::fs::File;
use std::path::Path;

use log::{debug, warn};

use crate::buffer_source::BufferSource;
use crate::error::{MoError, Result};
use crate::format::{read_string_table, validate_hash_table, Metadata, MoHeader, StringDescriptor};
use crate::plural::Expression;
use crate::types::{ByteOrder, CatalogInfo};

/// Plural choice used when a catalog declares no rule, and for misses:
/// form 0 for exactly one item, form 1 otherwise.
pub fn germanic_plural(n: u32) -> usize {
    if n == 1 {
        0
    } else {
        1
    }
}

/// One parsed binary message catalog.
///
/// All table and string bounds are checked at parse time, so lookups index
/// the buffer without further checks. Lookups binary-search the original
/// strings, which `msgfmt` writes in byte order; an unsorted table is not
/// repaired and may produce misses.
#[derive(Debug)]
pub struct MoCatalog {
    buffer: BufferSource,
    header: MoHeader,
    originals: Vec<StringDescriptor>,
    translations: Vec<StringDescriptor>,
    metadata: Metadata,
}

impl MoCatalog {
    /// Open and parse the catalog at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let buffer = BufferSource::open(&mut file)?;
        Self::parse(buffer)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::parse(BufferSource::from_bytes(data))
    }

    /// Validate and index `buffer`. Any structural problem rejects the
    /// whole catalog; the buffer is released on every error path.
    pub fn parse(buffer: BufferSource) -> Result<Self> {
        let data = buffer.as_slice();
        let header = MoHeader::parse(data)?;
        let order = header.byte_order;

        if usize::try_from(header.num_strings).is_err() {
            return Err(MoError::InvalidFormat("too many strings in catalog".to_string()));
        }

        let originals = read_string_table(
            data,
            order,
            header.orig_tab_offset,
            header.num_strings,
            "original strings",
        )?;
        let translations = read_string_table(
            data,
            order,
            header.trans_tab_offset,
            header.num_strings,
            "translated strings",
        )?;

        if header.has_hash_table() {
            validate_hash_table(
                data,
                order,
                header.hash_tab_offset,
                header.hash_tab_size,
                header.num_strings,
            )?;
        }

        let mut catalog = MoCatalog {
            buffer,
            header,
            originals,
            translations,
            metadata: Metadata::default(),
        };

        if catalog.msg_id(0).is_some_and(<[u8]>::is_empty) {
            let text = String::from_utf8_lossy(catalog.msg_str(0, 0).unwrap_or_default()).into_owned();
            catalog.metadata = Metadata::parse(&text)?;
        }

        if cfg!(debug_assertions) && !catalog.is_sorted() {
            warn!("original strings are not sorted; lookups may miss");
        }

        debug!(
            "parsed catalog: {} strings, charset {:?}, mapped {}",
            catalog.num_strings(),
            catalog.charset(),
            catalog.buffer.is_mapped()
        );
        Ok(catalog)
    }

    fn bytes(&self, descriptor: &StringDescriptor) -> &[u8] {
        &self.buffer.as_slice()[descriptor.range()]
    }

    // The lookup key stops at the first nul, which separates msgid from
    // msgid_plural.
    fn key_of(&self, descriptor: &StringDescriptor) -> &[u8] {
        let raw = self.bytes(descriptor);
        match raw.iter().position(|&b| b == 0) {
            Some(zero) => &raw[..zero],
            None => raw,
        }
    }

    fn is_sorted(&self) -> bool {
        self.originals
            .windows(2)
            .all(|pair| self.key_of(&pair[0]) <= self.key_of(&pair[1]))
    }

    /// Original message at `idx`, without any plural id.
    pub fn msg_id(&self, idx: usize) -> Option<&[u8]> {
        self.originals.get(idx).map(|d| self.key_of(d))
    }

    /// Translated form `plural` of the message at `idx`.
    ///
    /// Forms are nul-separated. A `plural` past the last form selects the
    /// last form; an `idx` past the last message yields `None`.
    pub fn msg_str(&self, idx: usize, plural: usize) -> Option<&[u8]> {
        let raw = self.bytes(self.translations.get(idx)?);
        let mut forms = raw.split(|&b| b == 0);
        let mut selected = forms.next().unwrap_or_default();
        for _ in 0..plural {
            match forms.next() {
                Some(form) => selected = form,
                None => break,
            }
        }
        Some(selected)
    }

    /// Binary search for `msgid`.
    pub fn find(&self, msgid: &[u8]) -> Option<usize> {
        let idx = self
            .originals
            .partition_point(|d| self.key_of(d) < msgid);
        self.originals
            .get(idx)
            .is_some_and(|d| self.key_of(d) == msgid)
            .then_some(idx)
    }

    /// Plural form index for `n` under this catalog's rule.
    pub fn plural_index(&self, n: u32) -> usize {
        let Some(expr) = &self.metadata.plural else {
            return germanic_plural(n);
        };
        match expr.try_eval(n) {
            Some(form) => usize::try_from(form.max(0)).unwrap_or(usize::MAX),
            None => {
                warn!("plural expression {} faulted for n={}", expr, n);
                germanic_plural(n)
            }
        }
    }

    /// Translation of `key`, choosing the plural form for `n` if given.
    pub fn find_message(&self, key: &[u8], n: Option<u32>) -> Option<&[u8]> {
        let idx = self.find(key)?;
        let form = n.map_or(0, |n| self.plural_index(n));
        self.msg_str(idx, form)
    }

    pub fn gettext<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        match self.find_message(msgid.as_bytes(), None) {
            Some(msgstr) => String::from_utf8_lossy(msgstr),
            None => Cow::Borrowed(msgid),
        }
    }

    pub fn ngettext<'a>(&'a self, msgid: &'a str, msgid_plural: &'a str, n: u32) -> Cow<'a, str> {
        match self.find_message(msgid.as_bytes(), Some(n)) {
            Some(msgstr) => String::from_utf8_lossy(msgstr),
            None if germanic_plural(n) == 0 => Cow::Borrowed(msgid),
            None => Cow::Borrowed(msgid_plural),
        }
    }

    pub fn num_strings(&self) -> usize {
        self.originals.len()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    pub fn header(&self) -> &MoHeader {
        &self.header
    }

    /// Declared charset of the translations. Strings are not transcoded.
    pub fn charset(&self) -> Option<&str> {
        self.metadata.charset.as_deref()
    }

    pub fn plural_forms(&self) -> Option<&str> {
        self.metadata.plural_forms.as_deref()
    }

    pub fn plural_expression(&self) -> Option<&Expression> {
        self.metadata.plural.as_ref()
    }

    pub fn nplurals(&self) -> Option<u32> {
        self.metadata.nplurals
    }

    /// Metadata value for `key` (case-insensitive).
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }

    pub fn is_mapped(&self) -> bool {
        self.buffer.is_mapped()
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            byte_order: self.header.byte_order,
            major_version: self.header.major_version,
            minor_version: self.header.minor_version,
            num_strings: self.header.num_strings,
            charset: self.charset().map(str::to_string),
            plural_forms: self.plural_forms().map(str::to_string),
            nplurals: self.nplurals(),
            is_mapped: self.is_mapped(),
        }
    }
}
